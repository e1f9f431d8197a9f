//! constgov-core: shared foundation for the constant-governance analyzer.
//!
//! - Errors: one `thiserror` enum per subsystem, aggregated by `ValidationError`
//! - Config: TOML-based, layered resolution (CLI > env > project file > defaults)
//! - Traits: cooperative cancellation
//! - Tracing: `tracing-subscriber` setup driven by `CONSTGOV_LOG`

pub mod config;
pub mod errors;
pub mod traits;
pub mod tracing;
pub mod types;

pub use config::ConstgovConfig;
pub use errors::ValidationError;
pub use traits::{Cancellable, CancellationToken};
