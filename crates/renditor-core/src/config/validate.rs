//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.general.workdir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "general.workdir must not be empty".into(),
            ));
        }
        if self.tools.batch.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "tools.batch must not be empty".into(),
            ));
        }
        if self.tools.curl.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "tools.curl must not be empty".into(),
            ));
        }
        for (i, preset) in self.presets.iter().enumerate() {
            if preset.quality > 100 {
                return Err(ConfigError::ValidationError(format!(
                    "presets[{}].quality must be 0-100",
                    i
                )));
            }
            if !preset.blur.is_finite() || preset.blur < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "presets[{}].blur must be a non-negative number",
                    i
                )));
            }
        }
        match self.output.format.as_str() {
            "json" | "jsonl" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "output.format must be \"json\" or \"jsonl\", got \"{}\"",
                    other
                )));
            }
        }
        Ok(())
    }
}
