//! Attribute materialization for new instances

use crate::attributes::AttributeSet;
use crate::error::{AttributeError, HydrateResult};
use tableless_model::{FieldDeclaration, RecordType};
use tableless_types::{AttributeValue, RawRow, RawValue};

/// Build the attribute set of a new instance.
///
/// Every declared field appears exactly once, in declaration order. Fields
/// present in `inputs` are cast from the input, the rest from their declared
/// default. An input naming an undeclared field fails before anything is
/// cast.
pub fn materialize(record_type: &RecordType, inputs: &RawRow) -> HydrateResult<AttributeSet> {
    let fields = record_type.fields();
    if let Some(unknown) = inputs.keys().find(|name| !fields.contains(name)) {
        return Err(AttributeError::unknown_field(unknown.as_str(), record_type.name()));
    }

    let mut attributes = AttributeSet::with_capacity(fields.len());
    for declaration in fields.iter() {
        let raw = inputs.get(declaration.name()).unwrap_or(declaration.default());
        attributes.set(declaration.name(), cast_attribute(declaration, raw)?);
    }
    Ok(attributes)
}

/// Cast one raw value through a field's declared strategy
pub fn cast_attribute(
    declaration: &FieldDeclaration,
    raw: &RawValue,
) -> HydrateResult<AttributeValue> {
    declaration
        .strategy()
        .cast(raw)
        .map_err(|source| AttributeError::cast(declaration.name(), raw, source))
}
