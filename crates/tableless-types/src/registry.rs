//! Type registry
//!
//! Maps symbolic type names to coercion strategies. A registry is populated
//! before any field is declared and then shared immutably; registering takes
//! `&mut self`, so once a registry sits behind an `Arc` it can no longer grow.

use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::coercion::SharedStrategy;
use crate::config::TypeConfig;
use crate::error::ConfigurationError;
use crate::system_types::{self, SystemType};
use crate::temporal::{ReferenceZone, TimeZoneConverter};

static BUILTIN: Lazy<Arc<TypeRegistry>> = Lazy::new(|| Arc::new(TypeRegistry::new()));

/// Registry of coercion strategies by symbolic name
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    strategies: HashMap<String, SharedStrategy>,
    reference_zone: ReferenceZone,
    time_zone_aware: BTreeSet<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry with the built-in types, UTC as reference timezone
    /// and `datetime` as the only timezone-aware type
    pub fn new() -> Self {
        let config = TypeConfig::default();
        Self::with_zone(ReferenceZone::utc(), &config)
    }

    /// Create a registry with the built-in types from configuration
    pub fn from_config(config: &TypeConfig) -> Result<Self, ConfigurationError> {
        let zone = config.reference_zone()?;
        Ok(Self::with_zone(zone, config))
    }

    fn with_zone(reference_zone: ReferenceZone, config: &TypeConfig) -> Self {
        let strategies = SystemType::ALL
            .iter()
            .map(|ty| (ty.name().to_string(), ty.strategy()))
            .collect();
        Self {
            strategies,
            reference_zone,
            time_zone_aware: config.time_zone_aware_types.iter().cloned().collect(),
        }
    }

    /// Process-wide registry with default configuration
    pub fn builtin() -> Arc<TypeRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Register a strategy under a new symbolic name
    pub fn register(
        &mut self,
        name: impl Into<String>,
        strategy: SharedStrategy,
    ) -> Result<(), ConfigurationError> {
        let name = name.into();
        if self.strategies.contains_key(&name) {
            return Err(ConfigurationError::DuplicateType { name });
        }
        debug!("registering field type '{}'", name);
        self.strategies.insert(name, strategy);
        Ok(())
    }

    /// Look up a strategy by its exact registered name
    pub fn lookup(&self, name: &str) -> Result<SharedStrategy, ConfigurationError> {
        self.strategies
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownType {
                name: name.to_string(),
            })
    }

    /// Resolve a name as written in a declaration: remap legacy aliases,
    /// look the result up, and apply timezone decoration when the resolved
    /// type is timezone aware.
    pub fn resolve(&self, name: &str) -> Result<SharedStrategy, ConfigurationError> {
        let canonical = system_types::canonical_type_name(name);
        if system_types::is_legacy_alias(name) {
            warn!("field type '{}' is a legacy alias for '{}'", name, canonical);
        }
        let strategy = self.lookup(canonical)?;
        Ok(self.decorate(canonical, strategy))
    }

    /// Wrap `strategy` in the reference timezone when `name` is timezone aware
    pub fn decorate(&self, name: &str, strategy: SharedStrategy) -> SharedStrategy {
        if self.time_zone_aware.contains(name) && !strategy.is_time_zone_aware() {
            Arc::new(TimeZoneConverter::new(strategy, self.reference_zone))
        } else {
            strategy
        }
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// All registered names, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.strategies.keys().cloned().collect();
        names.sort();
        names
    }

    /// Reference timezone for naive temporal input
    pub fn reference_zone(&self) -> ReferenceZone {
        self.reference_zone
    }

    /// Check if a symbolic type gets timezone decoration
    pub fn is_time_zone_aware(&self, name: &str) -> bool {
        self.time_zone_aware.contains(system_types::canonical_type_name(name))
    }
}
