// Check Validator - Core Library
// Exposes the rule engine for the CLI, the terminal viewer and tests

pub mod config;     // Constants as data (reference date, window, limits)
pub mod error;      // Rule violations + fatal failures
pub mod reader;     // ASCII guard + CSV splitting with line numbers
pub mod record;     // 6/7 field check layout
pub mod registry;   // Duplicate check-number tracking
pub mod report;     // Structured result of one run
pub mod rules;      // One check per field
pub mod validator;  // Rule engine over a whole file

// Re-export commonly used types
pub use config::ValidatorConfig;
pub use error::{FatalError, ValidationError};
pub use reader::{read_records, SourceLine};
pub use record::CheckRecord;
pub use registry::CheckNumberRegistry;
pub use report::{Outcome, ValidationReport};
pub use validator::{validate_file, CheckValidator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
