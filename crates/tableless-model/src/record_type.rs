//! Record types
//!
//! A record type is declared through [`RecordTypeBuilder`] and frozen by
//! [`RecordTypeBuilder::build`]. Subtypes start from their parent's frozen
//! declaration table and copy it on their first own declaration, so the
//! parent never observes a subtype's fields.

use crate::declaration::{ColumnOptions, FieldDeclaration, FieldDeclarationTable};
use crate::null_schema::NULL_SCHEMA;
use crate::schema::SchemaSource;
use indexmap::IndexSet;
use log::debug;
use std::sync::Arc;
use tableless_types::{ConfigurationError, SharedStrategy, TypeRegistry};

/// Prefix of the synthetic table name reported for every record type
pub const TABLE_NAME_PREFIX: &str = "tableless_";

/// A frozen record type
#[derive(Debug)]
pub struct RecordType {
    name: String,
    parent: Option<Arc<RecordType>>,
    own_fields: IndexSet<String>,
    fields: Arc<FieldDeclarationTable>,
    registry: Arc<TypeRegistry>,
}

impl RecordType {
    /// Start declaring a root record type
    pub fn builder(name: impl Into<String>, registry: Arc<TypeRegistry>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            parent: None,
            own_fields: IndexSet::new(),
            fields: Arc::new(FieldDeclarationTable::new()),
            registry,
        }
    }

    /// Start declaring a subtype that inherits every field of `self`
    pub fn derive(self: &Arc<Self>, name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            parent: Some(Arc::clone(self)),
            own_fields: IndexSet::new(),
            fields: Arc::clone(&self.fields),
            registry: Arc::clone(&self.registry),
        }
    }

    /// Type name, e.g. `A.Person`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<RecordType>> {
        self.parent.as_ref()
    }

    /// Inherited and own declarations
    pub fn fields(&self) -> &FieldDeclarationTable {
        &self.fields
    }

    /// Look up one declaration
    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.get(name)
    }

    /// Declared field names in declaration order
    pub fn attribute_names(&self) -> Vec<String> {
        self.fields.names().map(str::to_string).collect()
    }

    /// Check if this type itself declared `field`, ignoring inherited fields
    pub fn declares_own(&self, field: &str) -> bool {
        self.own_fields.contains(field)
    }

    /// This type followed by its ancestors, most derived first
    pub fn ancestors(&self) -> impl Iterator<Item = &RecordType> {
        std::iter::successors(Some(self), |record_type| record_type.parent.as_deref())
    }

    /// The type that declared `field`.
    ///
    /// Walks from this type upward and returns the first type whose own
    /// declarations include the field. Falls back to `self`.
    pub fn field_owner(&self, field: &str) -> &RecordType {
        self.ancestors()
            .find(|record_type| record_type.declares_own(field))
            .unwrap_or(self)
    }

    /// Synthetic table name; no table backs it
    pub fn table_name(&self) -> String {
        format!("{TABLE_NAME_PREFIX}{}", self.name)
    }

    /// Always false
    pub fn table_exists(&self) -> bool {
        false
    }

    /// Schema source consulted for persisted columns
    pub fn schema(&self) -> &'static dyn SchemaSource {
        &NULL_SCHEMA
    }

    /// Registry the declarations were resolved against
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }
}

/// Mutable declaration phase of a record type
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: String,
    parent: Option<Arc<RecordType>>,
    own_fields: IndexSet<String>,
    fields: Arc<FieldDeclarationTable>,
    registry: Arc<TypeRegistry>,
}

impl RecordTypeBuilder {
    /// Declare a nullable column with no default
    pub fn column(
        self,
        name: impl Into<String>,
        type_name: &str,
    ) -> Result<Self, ConfigurationError> {
        self.column_with(name, type_name, ColumnOptions::default())
    }

    /// Declare a column with a default and nullability
    pub fn column_with(
        mut self,
        name: impl Into<String>,
        type_name: &str,
        options: ColumnOptions,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        Arc::make_mut(&mut self.fields).declare_with(
            &self.registry,
            name.clone(),
            type_name,
            options,
        )?;
        self.own_fields.insert(name);
        Ok(self)
    }

    /// Wrap the strategy of an already declared field
    pub fn decorate<F>(mut self, name: &str, decorator: F) -> Result<Self, ConfigurationError>
    where
        F: FnOnce(SharedStrategy) -> SharedStrategy,
    {
        if !self.fields.contains(name) {
            return Err(ConfigurationError::UndeclaredField {
                record_type: self.name,
                field: name.to_string(),
            });
        }
        Arc::make_mut(&mut self.fields).decorate(name, decorator);
        Ok(self)
    }

    /// Fields declared so far, inherited ones included
    pub fn fields(&self) -> &FieldDeclarationTable {
        &self.fields
    }

    /// Freeze the declarations
    pub fn build(self) -> Arc<RecordType> {
        debug!(
            "freezing record type {} with {} field(s) ({} own)",
            self.name,
            self.fields.len(),
            self.own_fields.len()
        );
        Arc::new(RecordType {
            name: self.name,
            parent: self.parent,
            own_fields: self.own_fields,
            fields: self.fields,
            registry: self.registry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tableless_types::{AttributeValue, CoercionResult, CoercionStrategy, RawValue};

    fn registry() -> Arc<TypeRegistry> {
        Arc::new(TypeRegistry::new())
    }

    #[derive(Debug)]
    struct Upcase(SharedStrategy);

    impl CoercionStrategy for Upcase {
        fn type_name(&self) -> &str {
            self.0.type_name()
        }

        fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
            Ok(match self.0.cast(raw)? {
                AttributeValue::Text(s) => AttributeValue::Text(s.to_uppercase()),
                other => other,
            })
        }
    }

    #[test]
    fn test_builder_collects_columns() {
        let person = RecordType::builder("Person", registry())
            .column("name", "text")
            .unwrap()
            .column("age", "integer")
            .unwrap()
            .build();

        assert_eq!(person.attribute_names(), vec!["name", "age"]);
        assert!(person.declares_own("name"));
        assert_eq!(person.table_name(), "tableless_Person");
        assert!(!person.table_exists());
        assert_eq!(person.schema().declared_field_count(), 0);
    }

    #[test]
    fn test_unknown_type_aborts_declaration() {
        let err = RecordType::builder("Person", registry())
            .column("name", "varchar")
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownType {
                name: "varchar".to_string()
            }
        );
    }

    #[test]
    fn test_subtype_does_not_leak_into_parent() {
        let parent = RecordType::builder("Parent", registry())
            .column("a", "text")
            .unwrap()
            .build();
        let child = parent
            .derive("Child")
            .column("b", "integer")
            .unwrap()
            .column("a", "integer")
            .unwrap()
            .build();

        assert_eq!(parent.attribute_names(), vec!["a"]);
        assert_eq!(parent.field("a").unwrap().type_name(), "text");
        assert_eq!(child.attribute_names(), vec!["a", "b"]);
        assert_eq!(child.field("a").unwrap().type_name(), "integer");
    }

    #[test]
    fn test_subtype_without_declarations_shares_parent_table() {
        let parent = RecordType::builder("Parent", registry())
            .column("a", "text")
            .unwrap()
            .build();
        let child = parent.derive("Child").build();
        assert!(Arc::ptr_eq(&parent.fields, &child.fields));
        assert_eq!(child.parent().unwrap().name(), "Parent");
    }

    #[test]
    fn test_field_owner_walk() {
        let base = RecordType::builder("Base", registry())
            .column("name", "text")
            .unwrap()
            .build();
        let middle = base.derive("Middle").column("age", "integer").unwrap().build();
        let leaf = middle.derive("Leaf").build();

        assert_eq!(leaf.field_owner("name").name(), "Base");
        assert_eq!(leaf.field_owner("age").name(), "Middle");
        assert_eq!(leaf.field_owner("unknown").name(), "Leaf");
        assert_eq!(
            leaf.ancestors().map(RecordType::name).collect::<Vec<_>>(),
            vec!["Leaf", "Middle", "Base"]
        );
    }

    #[test]
    fn test_decorate_declared_field() {
        let record_type = RecordType::builder("Person", registry())
            .column("name", "text")
            .unwrap()
            .decorate("name", |inner| Arc::new(Upcase(inner)))
            .unwrap()
            .build();

        let value = record_type
            .field("name")
            .unwrap()
            .strategy()
            .cast(&RawValue::from("ada"))
            .unwrap();
        assert_eq!(value, AttributeValue::from("ADA"));
    }

    #[test]
    fn test_decorate_undeclared_field() {
        let err = RecordType::builder("Person", registry())
            .decorate("name", |inner| inner)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UndeclaredField {
                record_type: "Person".to_string(),
                field: "name".to_string(),
            }
        );
    }

    #[test]
    fn test_decorating_inherited_field_leaves_parent_alone() {
        let parent = RecordType::builder("Parent", registry())
            .column("name", "text")
            .unwrap()
            .build();
        let child = parent
            .derive("Child")
            .decorate("name", |inner| Arc::new(Upcase(inner)))
            .unwrap()
            .build();

        let raw = RawValue::from("ada");
        let cast = |t: &RecordType| t.field("name").unwrap().strategy().cast(&raw).unwrap();
        assert_eq!(cast(&parent), AttributeValue::from("ada"));
        assert_eq!(cast(&child), AttributeValue::from("ADA"));
    }
}
