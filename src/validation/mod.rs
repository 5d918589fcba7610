//! Form validation pipeline.
//!
//! Each form declares an ordered list of [`FieldRules`]; every field is
//! trimmed, checked against its rules in order (the first failure is
//! reported), and HTML-escaped. The sanitized values are kept even when a
//! check fails so the form can be re-rendered with the submitted input.

use std::collections::HashMap;

use serde::Deserialize;
use shelf_db::DocumentId;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::utils::escape_html;

/// Raw `application/x-www-form-urlencoded` body, repeated keys preserved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormInput(Vec<(String, String)>);

impl FormInput {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// First value submitted for `field`.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }

    /// Every value submitted for `field`, in order.
    pub fn all<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }
}

/// A single predicate applied to a trimmed field value.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    NonEmpty,
    MinLength(usize),
    MaxLength(usize),
    Alphanumeric,
    IsoDate,
    OneOf(&'static [&'static str]),
    Identifier,
}

impl Check {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Check::NonEmpty => !value.is_empty(),
            Check::MinLength(min) => value.chars().count() >= *min,
            Check::MaxLength(max) => value.chars().count() <= *max,
            Check::Alphanumeric => !value.is_empty() && value.chars().all(char::is_alphanumeric),
            Check::IsoDate => parse_date(value).is_some(),
            Check::OneOf(allowed) => allowed.iter().any(|candidate| *candidate == value),
            Check::Identifier => value.parse::<DocumentId>().is_ok(),
        }
    }
}

/// Ordered checks for one form field, each paired with its message.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    /// Optional fields accept an empty value without running their checks.
    pub optional: bool,
    pub checks: &'static [(Check, &'static str)],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Result of running a form through its rules.
#[derive(Debug, Default)]
pub struct Sanitized {
    values: HashMap<&'static str, String>,
    pub errors: Vec<FieldError>,
}

impl Sanitized {
    /// Trimmed, escaped value of a declared field.
    pub fn value(&self, field: &str) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every field rule against the submitted form.
pub fn validate(input: &FormInput, rules: &[FieldRules]) -> Sanitized {
    let mut sanitized = Sanitized::default();

    for rule in rules {
        let value = input.first(rule.field).unwrap_or_default().trim();

        if !(rule.optional && value.is_empty()) {
            if let Some((_, message)) = rule.checks.iter().find(|(check, _)| !check.passes(value)) {
                sanitized.errors.push(FieldError {
                    field: rule.field,
                    message: *message,
                });
            }
        }

        sanitized.values.insert(rule.field, escape_html(value));
    }

    sanitized
}

/// Trimmed, escaped values of a multi-valued field that parse as ids.
pub fn identifiers(input: &FormInput, field: &str) -> Vec<String> {
    input
        .all(field)
        .map(str::trim)
        .filter(|value| Check::Identifier.passes(value))
        .map(escape_html)
        .collect()
}

/// Parse a calendar date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
/// Timestamps are read as their UTC calendar date.
pub fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .ok()
        .or_else(|| {
            OffsetDateTime::parse(value, &Rfc3339)
                .ok()
                .map(|timestamp| timestamp.to_offset(UtcOffset::UTC).date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const RULES: &[FieldRules] = &[
        FieldRules {
            field: "name",
            optional: false,
            checks: &[
                (Check::NonEmpty, "Name must be specified."),
                (Check::MaxLength(5), "Name is too long."),
            ],
        },
        FieldRules {
            field: "born",
            optional: true,
            checks: &[(Check::IsoDate, "Invalid date")],
        },
    ];

    #[test]
    fn trims_and_escapes_values() {
        let input = FormInput::from_pairs([("name", "  <i>  "), ("born", "")]);
        let sanitized = validate(&input, RULES);
        assert!(sanitized.is_valid());
        assert_eq!(sanitized.value("name"), "&lt;i&gt;");
        assert_eq!(sanitized.value("born"), "");
    }

    #[test]
    fn reports_first_failing_check_per_field() {
        let input = FormInput::from_pairs([("name", "   "), ("born", "1999-02-30")]);
        let sanitized = validate(&input, RULES);
        assert_eq!(
            sanitized.errors,
            vec![
                FieldError {
                    field: "name",
                    message: "Name must be specified."
                },
                FieldError {
                    field: "born",
                    message: "Invalid date"
                },
            ]
        );
        assert_eq!(sanitized.value("born"), "1999-02-30");
    }

    #[test]
    fn missing_required_field_fails() {
        let sanitized = validate(&FormInput::default(), RULES);
        assert_eq!(sanitized.errors.len(), 1);
        assert_eq!(sanitized.errors[0].field, "name");
    }

    #[test]
    fn length_counts_characters() {
        assert!(Check::MaxLength(5).passes("Émile"));
        assert!(!Check::MinLength(3).passes("ab"));
    }

    #[test]
    fn alphanumeric_rejects_spaces_and_punctuation() {
        assert!(Check::Alphanumeric.passes("Brontë"));
        assert!(!Check::Alphanumeric.passes("O'Brien"));
        assert!(!Check::Alphanumeric.passes("Mary Ann"));
    }

    #[test]
    fn one_of_matches_exactly() {
        let check = Check::OneOf(&["Available", "Loaned"]);
        assert!(check.passes("Loaned"));
        assert!(!check.passes("loaned"));
    }

    #[test]
    fn parses_dates_and_timestamps() {
        assert_eq!(parse_date("2024-05-01"), Some(date!(2024 - 05 - 01)));
        assert_eq!(
            parse_date("2024-05-01T23:00:00Z"),
            Some(date!(2024 - 05 - 01))
        );
        assert_eq!(
            parse_date("2024-05-01T23:00:00-05:00"),
            Some(date!(2024 - 05 - 02))
        );
        assert_eq!(
            parse_date("2024-05-02T01:30:00+02:00"),
            Some(date!(2024 - 05 - 01))
        );
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("May 1, 2024"), None);
    }

    #[test]
    fn identifiers_keep_only_valid_ids() {
        let id = DocumentId::new().to_string();
        let input = FormInput::from_pairs([
            ("genre", id.as_str()),
            ("genre", "bogus"),
            ("other", id.as_str()),
        ]);
        assert_eq!(identifiers(&input, "genre"), vec![id.clone()]);
    }
}
