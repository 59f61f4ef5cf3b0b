//! Pure ACMI frame decoding, reference state, object store, relationship
//! resolution, and geodesy — no sockets, no database. The consumer loop
//! in `acmi-ingest` drives [`engine::Engine`] one frame at a time.

pub mod decode;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geo;
pub mod reference;
pub mod resolver;
pub mod store;

pub use engine::{Engine, Outcome};
pub use error::{AcmiError, Result};
