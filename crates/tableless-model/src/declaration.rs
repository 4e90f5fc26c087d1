//! Field declarations
//!
//! A declaration table maps field names to their coercion strategy, default
//! and nullability. Order is declaration order; redeclaring a name replaces
//! the entry in place.

use indexmap::IndexMap;
use log::debug;
use tableless_types::{ConfigurationError, RawValue, SharedStrategy, TypeRegistry};

/// Options accepted by a column declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOptions {
    /// Raw default, cast through the field's strategy when materialized
    pub default: RawValue,
    /// Whether the field accepts null
    pub nullable: bool,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            default: RawValue::Null,
            nullable: true,
        }
    }
}

impl ColumnOptions {
    /// Create options with no default and nullable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw default
    pub fn with_default(mut self, default: impl Into<RawValue>) -> Self {
        self.default = default.into();
        self
    }

    /// Mark the field as not nullable
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// One declared field
#[derive(Debug, Clone)]
pub struct FieldDeclaration {
    name: String,
    type_name: String,
    strategy: SharedStrategy,
    default: RawValue,
    nullable: bool,
}

impl FieldDeclaration {
    /// Create a declaration from an already resolved strategy
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        strategy: SharedStrategy,
        options: ColumnOptions,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            strategy,
            default: options.default,
            nullable: options.nullable,
        }
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Symbolic type as written in the declaration (before alias remapping)
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Coercion strategy, including any decoration
    pub fn strategy(&self) -> &SharedStrategy {
        &self.strategy
    }

    /// Raw default value
    pub fn default(&self) -> &RawValue {
        &self.default
    }

    /// Whether the field accepts null
    pub fn nullable(&self) -> bool {
        self.nullable
    }
}

/// Ordered declarations for one record type
#[derive(Debug, Clone, Default)]
pub struct FieldDeclarationTable {
    fields: IndexMap<String, FieldDeclaration>,
}

impl FieldDeclarationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a nullable field with no default
    pub fn declare(
        &mut self,
        registry: &TypeRegistry,
        name: impl Into<String>,
        type_name: &str,
    ) -> Result<&FieldDeclaration, ConfigurationError> {
        self.declare_with(registry, name, type_name, ColumnOptions::default())
    }

    /// Declare a field, resolving its symbolic type through `registry`.
    ///
    /// A previous declaration with the same name is replaced and keeps its
    /// position.
    pub fn declare_with(
        &mut self,
        registry: &TypeRegistry,
        name: impl Into<String>,
        type_name: &str,
        options: ColumnOptions,
    ) -> Result<&FieldDeclaration, ConfigurationError> {
        let name = name.into();
        let strategy = registry.resolve(type_name)?;
        debug!(
            "declaring field '{}' as {} (strategy {}, zone aware: {})",
            name,
            type_name,
            strategy.type_name(),
            strategy.is_time_zone_aware()
        );
        let declaration = FieldDeclaration::new(name, type_name, strategy, options);
        Ok(self.insert(declaration))
    }

    /// Insert or replace a declaration
    pub fn insert(&mut self, declaration: FieldDeclaration) -> &FieldDeclaration {
        let entry = self.fields.entry(declaration.name.clone());
        match entry {
            indexmap::map::Entry::Occupied(mut occupied) => {
                occupied.insert(declaration);
                occupied.into_mut()
            }
            indexmap::map::Entry::Vacant(vacant) => vacant.insert(declaration),
        }
    }

    /// Replace a declared field's strategy with a decorated one
    pub fn decorate<F>(&mut self, name: &str, decorator: F) -> Option<&FieldDeclaration>
    where
        F: FnOnce(SharedStrategy) -> SharedStrategy,
    {
        let declaration = self.fields.get_mut(name)?;
        declaration.strategy = decorator(declaration.strategy.clone());
        Some(declaration)
    }

    /// Get a declaration by field name
    pub fn get(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.get(name)
    }

    /// Check if a field is declared
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Declared names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Declarations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.fields.values()
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if nothing is declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
