//! Rule trait shared by built-in and custom validators.

use crate::error::RuleError;
use crate::value::FieldValue;
use std::fmt::Debug;

/// Context handed to a rule and to message factories.
#[derive(Debug, Clone, Copy)]
pub struct ValidationArguments<'a> {
    /// Property name as declared on the DTO (not the wire name).
    pub property: &'a str,
    /// The whole property value, after inbound transforms.
    pub value: &'a FieldValue,
    /// Whether the rule runs element-wise over arrays.
    pub each: bool,
}

impl<'a> ValidationArguments<'a> {
    pub fn new(property: &'a str, value: &'a FieldValue) -> Self {
        Self {
            property,
            value,
            each: false,
        }
    }

    /// `"each value in "` for element-wise rules, empty otherwise.
    pub fn each_prefix(&self) -> &'static str {
        if self.each {
            "each value in "
        } else {
            ""
        }
    }
}

/// Trait for individual validation rules.
///
/// Each rule inspects a single property value and returns a `RuleError` on
/// failure. Rules are stored behind `Arc<dyn ValidationRule>` in field specs
/// and shared across threads.
///
/// ## Example
///
/// ```rust,ignore
/// use apidto_validate::prelude::*;
///
/// #[derive(Debug)]
/// struct PositiveRule;
///
/// impl ValidationRule for PositiveRule {
///     fn validate(&self, args: &ValidationArguments<'_>) -> Result<(), RuleError> {
///         match args.value.as_value().and_then(|v| v.as_f64()) {
///             Some(n) if n > 0.0 => Ok(()),
///             _ => Err(RuleError::new("positive", format!("{} must be positive", args.property))),
///         }
///     }
///
///     fn rule_name(&self) -> &str {
///         "positive"
///     }
/// }
/// ```
pub trait ValidationRule: Debug + Send + Sync {
    /// Validate the value against this rule.
    fn validate(&self, args: &ValidationArguments<'_>) -> Result<(), RuleError>;

    /// Get the rule name/code for error reporting.
    fn rule_name(&self) -> &str;
}
