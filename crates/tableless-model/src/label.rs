//! Human-facing attribute labels
//!
//! A label has the form `<owner>|<Segment>|<Segment>`, where the owner is the
//! record type that declared the field and segments come from splitting the
//! field name on `.`. Foreign key fields (ending in `_id`) get a single
//! humanized segment with no owner prefix.

use crate::record_type::RecordType;
use convert_case::{Case, Casing};
use std::fmt;
use std::sync::Arc;

/// Function turning a field name segment into display text
pub type Humanizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Derives labels with an explicit humanizer
#[derive(Clone)]
pub struct LabelDeriver {
    humanizer: Humanizer,
}

impl fmt::Debug for LabelDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelDeriver").finish_non_exhaustive()
    }
}

impl Default for LabelDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelDeriver {
    /// Create a deriver using [`humanize`]
    pub fn new() -> Self {
        Self {
            humanizer: Arc::new(humanize),
        }
    }

    /// Replace the humanizer, e.g. with a locale-specific one
    pub fn with_humanizer<F>(mut self, humanizer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.humanizer = Arc::new(humanizer);
        self
    }

    /// Label for `field` on `record_type`.
    ///
    /// Foreign key fields are labelled by the record they point to and carry
    /// no owner prefix.
    pub fn label(&self, record_type: &RecordType, field: &str) -> String {
        if field.ends_with("_id") {
            return (self.humanizer)(field);
        }
        let owner = record_type.field_owner(field);
        let segments = field
            .split('.')
            .map(|segment| (self.humanizer)(segment))
            .collect::<Vec<_>>()
            .join("|");
        format!("{}|{}", owner.name(), segments)
    }
}

/// Turn a field name into display text: leading underscores and a trailing
/// `_id` are dropped, then the words are sentence cased.
pub fn humanize(word: &str) -> String {
    let trimmed = word.trim_start_matches('_');
    let base = trimmed.strip_suffix("_id").unwrap_or(trimmed);
    base.to_case(Case::Sentence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tableless_types::TypeRegistry;

    #[rstest]
    #[case("name", "Name")]
    #[case("first_name", "First name")]
    #[case("model_id", "Model")]
    #[case("_private", "Private")]
    #[case("HTML_body", "Html body")]
    #[case("", "")]
    fn test_humanize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(humanize(input), expected);
    }

    fn person() -> Arc<RecordType> {
        RecordType::builder("A.Person", Arc::new(TypeRegistry::new()))
            .column("name", "text")
            .unwrap()
            .column("model_id", "integer")
            .unwrap()
            .build()
    }

    #[test]
    fn test_label_simple_field() {
        assert_eq!(LabelDeriver::new().label(&person(), "name"), "A.Person|Name");
    }

    #[test]
    fn test_label_foreign_key_is_single_segment() {
        assert_eq!(LabelDeriver::new().label(&person(), "model_id"), "Model");
    }

    #[test]
    fn test_label_nested_path() {
        assert_eq!(
            LabelDeriver::new().label(&person(), "address.street_name"),
            "A.Person|Address|Street name"
        );
    }

    #[test]
    fn test_label_uses_declaring_type() {
        let child = person().derive("A.Employee").column("salary", "decimal").unwrap().build();
        let deriver = LabelDeriver::new();
        assert_eq!(deriver.label(&child, "name"), "A.Person|Name");
        assert_eq!(deriver.label(&child, "salary"), "A.Employee|Salary");
    }

    #[test]
    fn test_custom_humanizer() {
        let deriver = LabelDeriver::new().with_humanizer(|s| s.to_uppercase());
        assert_eq!(deriver.label(&person(), "name"), "A.Person|NAME");
    }
}
