//! Field rules and the pure validators that evaluate them.
//!
//! Every field is checked on its own; no rule looks at another field.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::field::{Field, FieldValue};

static HTTP_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://.+").expect("image url pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    HttpUrl,
}

impl Field {
    pub fn rules(self) -> &'static [Rule] {
        match self {
            Field::Name => &[Rule::Required, Rule::MinLength(3), Rule::MaxLength(100)],
            Field::Description => &[Rule::Required, Rule::MinLength(10), Rule::MaxLength(500)],
            Field::Price => &[Rule::Required, Rule::Min(0.01), Rule::Max(1_000_000.0)],
            Field::ImageUrl => &[Rule::Required, Rule::HttpUrl],
            Field::Quantity => &[Rule::Required, Rule::Min(0.0), Rule::Max(10_000.0)],
            Field::CategoryId => &[Rule::Required, Rule::Min(1.0)],
            Field::IsActive => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("is required")]
    Required,
    #[error("must be at least {min} characters (got {actual})")]
    MinLength { min: usize, actual: usize },
    #[error("must be at most {max} characters (got {actual})")]
    MaxLength { max: usize, actual: usize },
    #[error("must be at least {min}")]
    Min { min: f64, actual: f64 },
    #[error("must be at most {max}")]
    Max { max: f64, actual: f64 },
    #[error("must be an http(s) URL")]
    Pattern,
    #[error("must be a finite number")]
    NotFinite,
}

/// Validates one value against the rules of `field`. Returns the first
/// failing rule.
pub fn validate_field(field: Field, value: &FieldValue) -> Result<(), FieldError> {
    field.rules().iter().try_for_each(|rule| check(*rule, value))
}

fn check(rule: Rule, value: &FieldValue) -> Result<(), FieldError> {
    match (rule, value) {
        (Rule::Required, FieldValue::Text(s)) if s.is_empty() => Err(FieldError::Required),
        (Rule::Required, FieldValue::Number(None) | FieldValue::Integer(None)) => {
            Err(FieldError::Required)
        }
        (Rule::Required, FieldValue::Number(Some(n))) if !n.is_finite() => {
            Err(FieldError::NotFinite)
        }
        // Length and pattern rules leave empty text to `Required`.
        (Rule::MinLength(min), FieldValue::Text(s)) if !s.is_empty() => {
            let actual = s.chars().count();
            if actual < min {
                return Err(FieldError::MinLength { min, actual });
            }
            Ok(())
        }
        (Rule::MaxLength(max), FieldValue::Text(s)) => {
            let actual = s.chars().count();
            if actual > max {
                return Err(FieldError::MaxLength { max, actual });
            }
            Ok(())
        }
        (Rule::HttpUrl, FieldValue::Text(s)) if !s.is_empty() && !HTTP_URL.is_match(s) => {
            Err(FieldError::Pattern)
        }
        (Rule::Min(min), value) => match numeric(value) {
            Some(actual) if actual < min => Err(FieldError::Min { min, actual }),
            _ => Ok(()),
        },
        (Rule::Max(max), value) => match numeric(value) {
            Some(actual) if actual > max => Err(FieldError::Max { max, actual }),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

fn numeric(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => *n,
        FieldValue::Integer(i) => i.map(|i| i as f64),
        _ => None,
    }
}

/// Failing fields of a form, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field} {error}")?;
        }
        Ok(())
    }
}
