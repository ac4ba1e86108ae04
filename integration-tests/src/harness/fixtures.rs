use std::fs;
use std::path::{Path, PathBuf};

/// Builds combined-format access log text line by line.
#[derive(Default)]
pub struct AccessLogBuilder {
    lines: Vec<String>,
}

impl AccessLogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ts` is `dd/Mon/yyyy:HH:MM:SS`.
    pub fn request(mut self, ip: &str, ts: &str, method: &str, path: &str, status: u16) -> Self {
        self.lines.push(format!(
            "{ip} - - [{ts} +0000] \"{method} {path} HTTP/1.1\" {status} 1024 \"-\" \"integration/1.0\""
        ));
        self
    }

    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

pub fn write_log(dir: &Path, name: &str, log: &AccessLogBuilder) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, log.build()).expect("failed to write access log fixture");
    path
}

pub fn write_config(dir: &Path, hcl: &str) {
    fs::write(dir.join(logreport_core::conf::CONFIG_FILE), hcl)
        .expect("failed to write config fixture");
}
