//! Validation adapter
//!
//! Normalizes schema validators and plain check functions into a single
//! `validate(&value) -> Option<String>` contract. Adapters chain their own
//! constraints after the caller's validator; the first message wins.

use std::fmt;
use std::sync::Arc;

use crate::model::NumberValue;

/// Message used when a schema rejects a value without saying why
pub const VALIDATION_FAILED: &str = "Validation failed";

/// A schema that can check a value without panicking.
pub trait Schema<T>: Send + Sync {
    /// `Ok(())` if the value is accepted, otherwise the issue messages in order
    fn safe_parse(&self, value: &T) -> Result<(), Vec<String>>;
}

type CheckFn<T> = dyn Fn(&T) -> Option<String> + Send + Sync;

/// A validator: nothing, a schema, a check function, or a chain of them.
pub enum Validator<T> {
    /// Always valid
    None,
    Schema(Arc<dyn Schema<T>>),
    Check(Arc<CheckFn<T>>),
    /// Run in order; the first message wins
    Chain(Vec<Validator<T>>),
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Validator::None
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        match self {
            Validator::None => Validator::None,
            Validator::Schema(schema) => Validator::Schema(Arc::clone(schema)),
            Validator::Check(check) => Validator::Check(Arc::clone(check)),
            Validator::Chain(items) => Validator::Chain(items.clone()),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::None => f.write_str("Validator::None"),
            Validator::Schema(_) => f.write_str("Validator::Schema(..)"),
            Validator::Check(_) => f.write_str("Validator::Check(..)"),
            Validator::Chain(items) => f.debug_tuple("Validator::Chain").field(items).finish(),
        }
    }
}

impl<T> Validator<T> {
    pub fn none() -> Self {
        Validator::None
    }

    pub fn schema(schema: impl Schema<T> + 'static) -> Self {
        Validator::Schema(Arc::new(schema))
    }

    pub fn check<F>(check: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Validator::Check(Arc::new(check))
    }

    pub fn is_none(&self) -> bool {
        match self {
            Validator::None => true,
            Validator::Chain(items) => items.iter().all(Validator::is_none),
            _ => false,
        }
    }

    /// Run `self` first, then `next`
    pub fn then(self, next: Validator<T>) -> Validator<T> {
        match (self, next) {
            (Validator::None, next) => next,
            (first, Validator::None) => first,
            (Validator::Chain(mut items), next) => {
                items.push(next);
                Validator::Chain(items)
            }
            (first, next) => Validator::Chain(vec![first, next]),
        }
    }

    /// `None` if the value is accepted, otherwise the error message
    pub fn validate(&self, value: &T) -> Option<String> {
        match self {
            Validator::None => None,
            Validator::Schema(schema) => match schema.safe_parse(value) {
                Ok(()) => None,
                Err(issues) => Some(
                    issues
                        .into_iter()
                        .next()
                        .filter(|msg| !msg.is_empty())
                        .unwrap_or_else(|| VALIDATION_FAILED.to_string()),
                ),
            },
            Validator::Check(check) => check(value),
            Validator::Chain(items) => items.iter().find_map(|v| v.validate(value)),
        }
    }
}

// ============================================================================
// Built-in schemas
// ============================================================================

/// String schema: required, length bounds and email shape.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    min_length: Option<(usize, Option<String>)>,
    max_length: Option<(usize, Option<String>)>,
    email: Option<Option<String>>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min: usize, message: Option<&str>) -> Self {
        self.min_length = Some((min, message.map(str::to_string)));
        self
    }

    pub fn max_length(mut self, max: usize, message: Option<&str>) -> Self {
        self.max_length = Some((max, message.map(str::to_string)));
        self
    }

    /// Shorthand for `min_length(1, message)`
    pub fn non_empty(self, message: &str) -> Self {
        self.min_length(1, Some(message))
    }

    pub fn email(mut self, message: Option<&str>) -> Self {
        self.email = Some(message.map(str::to_string));
        self
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !value.chars().any(char::is_whitespace)
}

impl Schema<String> for StringSchema {
    fn safe_parse(&self, value: &String) -> Result<(), Vec<String>> {
        let len = value.chars().count();
        let mut issues = Vec::new();

        if let Some((min, message)) = &self.min_length {
            if len < *min {
                issues.push(message.clone().unwrap_or_else(|| {
                    format!("String must contain at least {} character(s)", min)
                }));
            }
        }
        if let Some((max, message)) = &self.max_length {
            if len > *max {
                issues.push(message.clone().unwrap_or_else(|| {
                    format!("String must contain at most {} character(s)", max)
                }));
            }
        }
        if let Some(message) = &self.email {
            if !looks_like_email(value) {
                issues.push(message.clone().unwrap_or_else(|| "Invalid email".to_string()));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

/// Schema for optional numbers: required and inclusive bounds.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    required: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, message: &str) -> Self {
        self.required = Some(message.to_string());
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Schema<NumberValue> for NumberSchema {
    fn safe_parse(&self, value: &NumberValue) -> Result<(), Vec<String>> {
        let Some(n) = value else {
            return match &self.required {
                Some(message) => Err(vec![message.clone()]),
                None => Ok(()),
            };
        };

        let mut issues = Vec::new();
        if let Some(min) = self.min {
            if *n < min {
                issues.push(format!("Number must be greater than or equal to {}", min));
            }
        }
        if let Some(max) = self.max {
            if *n > max {
                issues.push(format!("Number must be less than or equal to {}", max));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}
