//! Data models: extracted records, selected files, configuration, session.

pub mod config;
pub mod record;
pub mod session;

pub use config::SdbxConfig;
pub use record::{ProcessedRecord, SelectedFile};
pub use session::Session;
