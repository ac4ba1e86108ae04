mod error;
mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{CONFIG_FILE, load_config, parse_config, validate_config};
pub use types::{LogreportConfig, OutputFormat, OutputSettings, PercentBase, ReportSettings};
