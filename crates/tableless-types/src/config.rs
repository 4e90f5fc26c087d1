//! Registry configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::system_types::SystemType;
use crate::temporal::ReferenceZone;

/// Settings that shape how a [`TypeRegistry`](crate::TypeRegistry) casts.
///
/// ```
/// use tableless_types::TypeConfig;
///
/// let config: TypeConfig = serde_json::from_str(r#"{"time_zone": "America/New_York"}"#).unwrap();
/// assert_eq!(config.reference_zone().unwrap().to_string(), "America/New_York");
/// assert_eq!(config.time_zone_aware_types, vec!["datetime".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeConfig {
    /// Reference timezone for naive temporal input: a UTC offset such as
    /// `-05:00` or an IANA name such as `America/New_York`
    pub time_zone: String,
    /// Symbolic types decorated with the reference timezone on declaration
    pub time_zone_aware_types: Vec<String>,
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            time_zone: "+00:00".to_string(),
            time_zone_aware_types: vec![SystemType::DateTime.name().to_string()],
        }
    }
}

impl TypeConfig {
    /// Create the default configuration (UTC, datetime is zone aware)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference timezone
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Replace the list of timezone-aware types
    pub fn with_time_zone_aware_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_zone_aware_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Load from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve the reference timezone
    pub fn reference_zone(&self) -> Result<ReferenceZone, ConfigurationError> {
        ReferenceZone::parse(&self.time_zone).ok_or_else(|| ConfigurationError::InvalidTimeZone {
            value: self.time_zone.clone(),
        })
    }
}
