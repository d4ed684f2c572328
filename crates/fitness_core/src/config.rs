use crate::FitnessError;
use crate::utils::parse_utc_offset;
use chrono::FixedOffset;

pub const DEFAULT_PLATFORM: &str = "GoogleFit";
pub const DEFAULT_PERMISSION_REQUEST_CODE: i32 = 111;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Platform name published to callers.
    pub platform: String,
    /// First request code handed to the native authorization flow.
    pub request_code_base: i32,
    /// Offset used when formatting record dates; `None` means local time.
    pub utc_offset: Option<FixedOffset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.into(),
            request_code_base: DEFAULT_PERMISSION_REQUEST_CODE,
            utc_offset: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, FitnessError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, FitnessError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let platform = get("FITNESS_PLATFORM").unwrap_or_else(|| DEFAULT_PLATFORM.into());
        let request_code_base = match get("FITNESS_PERMISSION_REQUEST_CODE") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                FitnessError::Config(format!(
                    "FITNESS_PERMISSION_REQUEST_CODE must be an integer, got {raw:?}"
                ))
            })?,
            None => DEFAULT_PERMISSION_REQUEST_CODE,
        };
        let utc_offset = match get("FITNESS_UTC_OFFSET") {
            Some(raw) => Some(parse_utc_offset(raw.trim()).ok_or_else(|| {
                FitnessError::Config(format!(
                    "FITNESS_UTC_OFFSET must look like +HH:MM, got {raw:?}"
                ))
            })?),
            None => None,
        };
        Ok(Self {
            platform,
            request_code_base,
            utc_offset,
        })
    }
}
