//! Form field descriptors
//!
//! 表单与过滤栏共用的字段描述: 一个封闭的控件种类枚举，注册时确定，
//! 取值与重置按种类分派，不在运行时按控件名分发。

use chrono::NaiveDate;

/// Value held by a form or filter control, one variant per control kind
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text input
    Text(Option<String>),
    /// Single-select, holds the selected key
    Select(Option<String>),
    /// Multi-select, holds the selected keys
    MultiSelect(Vec<String>),
    /// Single date picker
    Date(Option<NaiveDate>),
    /// Date range picker, holds both endpoints
    DateRange(Option<(NaiveDate, NaiveDate)>),
}

impl FieldValue {
    /// Whether the control holds no usable value.
    ///
    /// Extraction rule per kind: text counts only non-blank input, a
    /// multi-select counts a non-empty key list, a date range counts only
    /// when both endpoints are set.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.as_deref().map_or(true, |v| v.trim().is_empty()),
            FieldValue::Select(key) => key.is_none(),
            FieldValue::MultiSelect(keys) => keys.is_empty(),
            FieldValue::Date(date) => date.is_none(),
            FieldValue::DateRange(range) => range.is_none(),
        }
    }

    /// Set the kind's empty representation
    pub fn reset(&mut self) {
        match self {
            FieldValue::Text(value) => *value = None,
            FieldValue::Select(key) => *key = None,
            FieldValue::MultiSelect(keys) => keys.clear(),
            FieldValue::Date(date) => *date = None,
            FieldValue::DateRange(range) => *range = None,
        }
    }
}

/// A named, possibly required field of a form group
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub required: bool,
    pub value: FieldValue,
}

impl FormField {
    pub fn new(name: &'static str, value: FieldValue) -> Self {
        Self {
            name,
            required: false,
            value,
        }
    }

    pub fn required(name: &'static str, value: FieldValue) -> Self {
        Self {
            name,
            required: true,
            value,
        }
    }
}

/// Required-field scan over a field group (the strong check, run on save).
///
/// Returns the names of required fields that hold no value.
pub fn missing_required(fields: &[FormField]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|field| field.required && field.value.is_empty())
        .map(|field| field.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_counts_as_empty() {
        assert!(FieldValue::Text(Some("   ".into())).is_empty());
        assert!(!FieldValue::Text(Some("Widget".into())).is_empty());
    }

    #[test]
    fn test_reset_restores_empty_representation() {
        let mut value = FieldValue::MultiSelect(vec!["a".into(), "b".into()]);
        value.reset();
        assert_eq!(value, FieldValue::MultiSelect(Vec::new()));

        let mut value = FieldValue::DateRange(Some((
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )));
        value.reset();
        assert!(value.is_empty());
    }

    #[test]
    fn test_missing_required_reports_only_required_empty_fields() {
        let fields = vec![
            FormField::required("name", FieldValue::Text(None)),
            FormField::new("image", FieldValue::Text(None)),
            FormField::required("category", FieldValue::Select(Some("c1".into()))),
        ];

        assert_eq!(missing_required(&fields), vec!["name"]);
    }
}
