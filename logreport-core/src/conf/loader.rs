use crate::conf::error::ConfigError;
use crate::conf::types::LogreportConfig;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const CONFIG_FILE: &str = "logreport.hcl";

/// Loads `logreport.hcl` from `root`.
///
/// A missing file is not an error: every setting has a default. Any other
/// read failure, a parse failure, or an out-of-range value is.
pub fn load_config(root: &Path) -> Result<LogreportConfig, ConfigError> {
    let path = root.join(CONFIG_FILE);

    let cfg = match fs::read_to_string(&path) {
        Ok(s) => parse_config(&path, &s)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no config file found, using defaults");
            LogreportConfig::default()
        }
        Err(e) => return Err(ConfigError::read_file(&path, e)),
    };

    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn parse_config(path: &Path, contents: &str) -> Result<LogreportConfig, ConfigError> {
    hcl::from_str(contents).map_err(|e| ConfigError::parse(path, e))
}

pub fn validate_config(cfg: &LogreportConfig) -> Result<(), ConfigError> {
    if cfg.report.top_ips == 0 {
        return Err(ConfigError::invalid("report.top_ips", "must be greater than zero"));
    }

    if cfg.report.worst_failure_days == 0 {
        return Err(ConfigError::invalid(
            "report.worst_failure_days",
            "must be greater than zero",
        ));
    }

    if cfg.report.parallel_chunk_lines == Some(0) {
        return Err(ConfigError::invalid(
            "report.parallel_chunk_lines",
            "must be greater than zero when set",
        ));
    }

    if cfg.output.file_prefix.trim().is_empty() {
        return Err(ConfigError::invalid("output.file_prefix", "must not be empty"));
    }

    Ok(())
}
