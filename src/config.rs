use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Upper bound for configuration files, checked before reading.
const MAX_FILE_SIZE: u64 = 1024;

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Device namespace, the second segment of every topic.
    pub device_name: String,
}

impl Config {
    /// Creates a configuration for the device namespace `device_name`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the name is empty or cannot form a
    /// single topic segment: it may not contain `/`, nor the MQTT wildcards
    /// `+` and `#`.
    pub fn new(device_name: &str) -> Result<Self> {
        let illegal_chars = |chr: char| chr == '/' || chr == '+' || chr == '#';
        if device_name.is_empty() || device_name.contains(illegal_chars) {
            return Err(Error::invalid_argument(format!(
                "device name invalid (\"{device_name}\")"
            )));
        }

        trace!("device name: {device_name}");
        Ok(Self {
            device_name: device_name.to_owned(),
        })
    }

    /// Loads the configuration from a TOML file such as:
    ///
    /// ```toml
    /// device_name = "kitchen"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, is larger than 1 KiB,
    /// is not valid TOML or holds an invalid device name.
    pub fn from_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        // Prevent out-of-memory condition: configuration should be small.
        let file_size = fs::metadata(path)?.len();
        if file_size > MAX_FILE_SIZE {
            return Err(Error::invalid_argument(format!(
                "{} is too large ({file_size} bytes)",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Self::new(&config.device_name)
    }
}
