//! Persistence of the last observed reading
//!
//! The state file holds the previous run's excess flag, excess magnitude and
//! portal session token. It is read at the start of a run and overwritten at
//! the end.

use crate::error::Result;
use crate::logging::{LogContext, get_logger_with_context};
use crate::reading::Reading;
use std::path::{Path, PathBuf};

/// JSON state file manager
pub struct StateStore {
    file_path: PathBuf,
    logger: crate::logging::StructuredLogger,
}

impl StateStore {
    /// Create a new state store for the given file
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let logger = get_logger_with_context(
            LogContext::new("persistence").with_field("path", file_path.display().to_string()),
        );
        Self { file_path, logger }
    }

    /// Path of the state file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the previous reading.
    ///
    /// A missing file is a first run and yields a neutral reading (no
    /// excess, no token). An unreadable or undecodable file is an error.
    pub fn load(&self) -> Result<Reading> {
        if !self.file_path.exists() {
            self.logger.warn(&format!(
                "No state file at {}, starting from a neutral reading",
                self.file_path.display()
            ));
            return Ok(Reading::default());
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let reading: Reading = serde_json::from_str(&contents)?;
        self.logger.debug("Loaded previous reading from disk");

        Ok(reading)
    }

    /// Save the reading, replacing the previous state.
    ///
    /// The content is written to a sibling temp file first and renamed over
    /// the state file.
    pub fn save(&self, reading: &Reading) -> Result<()> {
        let contents = serde_json::to_string(reading)?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.file_path)?;
        self.logger.debug("Saved reading to disk");

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}
