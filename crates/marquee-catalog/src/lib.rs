//! The movie catalog service.
//!
//! [`CatalogService`] answers every [`marquee_core::MovieCatalog`] query from a
//! fresh snapshot of a [`marquee_core::MovieStore`], drawing random picks from a
//! [`RandomSource`].

pub mod random;
pub mod service;

pub use random::{ProcessRandom, RandomSource, SeededRandom, ThreadRandom};
pub use service::CatalogService;
