//! INI file configuration adapter.
//!
//! Section and key lookups are case-insensitive. Values that are present but
//! malformed fall back to the caller's default with a warning, so a typo in a
//! colour or toggle never stops a chart from rendering.

use crate::domain::error::ChartError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;
use tracing::{debug, warn};

const INLINE_SOURCE: &str = "<inline>";

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| ChartError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        debug!(path = %path.display(), sections = config.sections().len(), "loaded chart config");
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, ChartError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| ChartError::ConfigParse {
                file: INLINE_SOURCE.to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }

    /// Parse a present value with `parse`, warning and using `default` when it
    /// does not parse.
    fn typed<T, F>(&self, section: &str, key: &str, default: T, parse: F) -> T
    where
        T: Copy + std::fmt::Display,
        F: Fn(&str) -> Option<T>,
    {
        let Some(raw) = self.config.get(section, key) else {
            return default;
        };
        parse(&raw).unwrap_or_else(|| {
            warn!(section, key, value = %raw, %default, "unrecognised config value, using default");
            default
        })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key).filter(|v| !v.trim().is_empty())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.typed(section, key, default, |v| v.trim().parse().ok())
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.typed(section, key, default, |v| {
            v.trim().parse::<f64>().ok().filter(|f| f.is_finite())
        })
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.typed(section, key, default, Self::parse_bool)
    }
}
