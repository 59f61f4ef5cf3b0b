//! Shared value types for the ACMI telemetry ingester.
//!
//! This crate mirrors the role `spatio-types` plays for the teacher's
//! database engine: plain data, no logic, no I/O, so every other crate in
//! the workspace can depend on it without pulling in tokio or postgres.

pub mod config;
pub mod event;
pub mod impact;
pub mod object;
pub mod session;

pub use config::RunConfig;
pub use event::Event;
pub use impact::Impact;
pub use object::ObjectRec;
pub use session::{Coalition, Color, Session, SessionStatus};

/// Crate version, exposed the way `spatio::VERSION` is.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use crate::{Coalition, Color, Event, Impact, ObjectRec, RunConfig, Session, SessionStatus};
}
