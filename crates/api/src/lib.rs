//! Folio API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! routes, startup) so integration tests and both binaries can share them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod startup;
pub mod state;
