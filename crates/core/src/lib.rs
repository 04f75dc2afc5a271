//! Domain-neutral building blocks shared by the store and API crates.
//!
//! Nothing in here touches the database or HTTP; the statistics generator
//! and the timestamp helpers are pure functions over plain inputs.

pub mod error;
pub mod serde_ext;
pub mod stats;
pub mod timestamps;
pub mod types;
