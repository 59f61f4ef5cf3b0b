//! Postgres write pipeline: connection pooling, the fixed schema
//! bootstrap, single-row inserts, session lifecycle, and the batched
//! binary-COPY bulk writer.

pub mod binary_copy;
pub mod error;
pub mod object;
pub mod pool;
pub mod schema;
pub mod session;
pub mod writer;

pub use error::{DbError, Result};
pub use pool::build_pool;
pub use writer::BulkWriter;
