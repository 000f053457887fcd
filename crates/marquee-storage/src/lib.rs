//! Record store backends for the Marquee catalog.

pub mod memory;
pub mod mysql;

pub use marquee_core::error::{Result, StorageError};
pub use marquee_core::store::{MovieStore, ReadStore};
pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
