//! Core types and traits for the Marquee movie catalog.
//!
//! This crate provides the movie record, the record store contract, the
//! catalog contract, and the snapshot queries shared by the service and the
//! storage backends.

pub mod catalog;
pub mod error;
pub mod movie;
pub mod snapshot;
pub mod store;

pub use catalog::MovieCatalog;
pub use error::{CatalogError, StorageError};
pub use movie::{Movie, MovieId, NewMovie};
pub use snapshot::Snapshot;
pub use store::{MovieStore, ReadStore};
