//! Declarative per-field validation.
//!
//! A [`RuleSet`] lists, for each field, the message to report when the
//! field is missing and an ordered list of [`Rule`]s. Evaluation stops at the
//! first failing rule of a field but always visits every field, so the
//! resulting [`ValidationError::Fields`] carries at most one message per
//! field.
//!
//! Values are raw JSON so that type mismatches (`"lat": "north"`) surface as
//! field messages rather than body-parsing failures.

use serde_json::Value;

use crate::error::{FieldErrors, ValidationError};

/// Whether an absent field is reported or skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absent fields are reported with their `missing` message.
    Required,
    /// Absent fields are skipped; present ones are still checked.
    Optional,
}

/// A single check applied to a present, non-blank value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// Value is a JSON string.
    Text,
    /// Value is a finite number, or a string that parses as one.
    Number,
    /// Numeric value within the inclusive range.
    Between(f64, f64),
    /// Numeric value strictly greater than zero.
    Positive,
    /// String of at most this many characters.
    MaxChars(usize),
}

impl Check {
    fn passes(self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Number => as_number(value).is_some(),
            Self::Between(min, max) => as_number(value).is_some_and(|n| (min..=max).contains(&n)),
            Self::Positive => as_number(value).is_some_and(|n| n > 0.0),
            Self::MaxChars(max) => value.as_str().is_some_and(|s| s.chars().count() <= max),
        }
    }
}

/// A check paired with the message reported when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub check: Check,
    pub message: &'static str,
}

/// Rules for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    /// Reported when the field is required but absent, or present but blank.
    pub missing: &'static str,
    pub rules: &'static [Rule],
}

/// A named collection of field rules evaluated together.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub presence: Presence,
    pub fields: &'static [FieldRules],
}

impl RuleSet {
    /// Evaluate every field, looking values up through `lookup`.
    ///
    /// `null` is treated as absent. An empty or whitespace-only string is
    /// reported with the field's `missing` message regardless of presence.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Fields`] with one message per failing field.
    pub fn check<'a, F>(&self, lookup: F) -> Result<(), ValidationError>
    where
        F: Fn(&str) -> Option<&'a Value>,
    {
        let mut errors = FieldErrors::new();
        for entry in self.fields {
            match lookup(entry.field) {
                None | Some(Value::Null) => {
                    if self.presence == Presence::Required {
                        errors.insert(entry.field, entry.missing);
                    }
                }
                Some(value) if is_blank(value) => {
                    errors.insert(entry.field, entry.missing);
                }
                Some(value) => {
                    if let Some(rule) = entry.rules.iter().find(|rule| !rule.check.passes(value)) {
                        errors.insert(entry.field, rule.message);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Fields(errors))
        }
    }
}

fn is_blank(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

/// Read a value as a finite number, accepting numeric strings.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Read a value as an owned string.
#[must_use]
pub fn as_text(value: &Value) -> Option<String> {
    value.as_str().map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RULES: RuleSet = RuleSet {
        presence: Presence::Required,
        fields: &[
            FieldRules {
                field: "title",
                missing: "Title is required",
                rules: &[
                    Rule {
                        check: Check::Text,
                        message: "Title is required",
                    },
                    Rule {
                        check: Check::MaxChars(5),
                        message: "Title is too long",
                    },
                ],
            },
            FieldRules {
                field: "rating",
                missing: "Rating is required",
                rules: &[
                    Rule {
                        check: Check::Number,
                        message: "Rating is not a number",
                    },
                    Rule {
                        check: Check::Between(0.0, 10.0),
                        message: "Rating is out of range",
                    },
                ],
            },
        ],
    };

    fn run(rules: &RuleSet, input: &Value) -> Result<(), ValidationError> {
        rules.check(|field| input.get(field))
    }

    #[test]
    fn should_pass_when_all_rules_hold() {
        assert!(run(&RULES, &json!({"title": "abc", "rating": 3})).is_ok());
    }

    #[test]
    fn should_report_every_missing_field_when_required() {
        let err = run(&RULES, &json!({})).unwrap_err();
        let fields = err.fields().unwrap();
        assert_eq!(fields.get("title"), Some(&"Title is required"));
        assert_eq!(fields.get("rating"), Some(&"Rating is required"));
    }

    #[test]
    fn should_stop_at_first_failing_rule_per_field() {
        let err = run(&RULES, &json!({"title": "abc", "rating": "high"})).unwrap_err();
        assert_eq!(
            err.fields().unwrap().get("rating"),
            Some(&"Rating is not a number")
        );
    }

    #[test]
    fn should_keep_validating_other_fields_after_a_failure() {
        let err = run(&RULES, &json!({"title": "abcdefgh", "rating": 11})).unwrap_err();
        let fields = err.fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("title"), Some(&"Title is too long"));
        assert_eq!(fields.get("rating"), Some(&"Rating is out of range"));
    }

    #[test]
    fn should_skip_absent_fields_when_optional() {
        let optional = RuleSet {
            presence: Presence::Optional,
            ..RULES
        };
        assert!(run(&optional, &json!({"rating": null})).is_ok());
        assert!(run(&optional, &json!({"rating": 42})).is_err());
    }

    #[test]
    fn should_report_blank_strings_as_missing_even_when_optional() {
        let optional = RuleSet {
            presence: Presence::Optional,
            ..RULES
        };
        let err = run(&optional, &json!({"title": "  "})).unwrap_err();
        assert_eq!(err.fields().unwrap().get("title"), Some(&"Title is required"));
    }

    #[test]
    fn should_read_numeric_strings_as_numbers() {
        assert_eq!(as_number(&json!("12.5")), Some(12.5));
        assert_eq!(as_number(&json!(7)), Some(7.0));
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!(true)), None);
    }
}
