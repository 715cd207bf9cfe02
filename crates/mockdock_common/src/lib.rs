pub mod config;
pub mod diagnostic;
pub mod telemetry;

// Universal Result type for the workspace
pub type Result<T> = std::result::Result<T, diagnostic::Error>;
