//! Predicate-based rules.
//!
//! [`ValidateBy`] turns any predicate over a [`FieldValue`] into a
//! [`ValidationRule`]; every built-in constraint is one. [`CustomValidate`]
//! is the user-facing entry point for bespoke checks.

use crate::error::RuleError;
use crate::traits::{ValidationArguments, ValidationRule};
use crate::value::FieldValue;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Type alias for rule predicates to reduce complexity.
pub type Predicate = Arc<dyn Fn(&FieldValue, &ValidationArguments<'_>) -> bool + Send + Sync>;

type MessageFn = Arc<dyn Fn(&ValidationArguments<'_>) -> String + Send + Sync>;

/// Error message of a rule: fixed text or built from the arguments.
#[derive(Clone)]
pub enum Message {
    Text(String),
    Dynamic(MessageFn),
}

impl Message {
    /// Message computed from the validation arguments.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&ValidationArguments<'_>) -> String + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    pub fn render(&self, args: &ValidationArguments<'_>) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Dynamic(f) => f(args),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Options shared by every predicate rule.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Apply the predicate to every element of an array value.
    pub each: bool,
    /// Replaces the rule's default message. Never prefixed.
    pub message: Option<Message>,
}

impl ValidationOptions {
    pub fn each(each: bool) -> Self {
        Self {
            each,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A named predicate with a default message.
#[derive(Clone)]
pub struct ValidateBy {
    name: Cow<'static, str>,
    predicate: Predicate,
    default_message: Message,
    options: ValidationOptions,
}

impl ValidateBy {
    pub fn new<F>(
        name: impl Into<Cow<'static, str>>,
        predicate: F,
        default_message: impl Into<Message>,
    ) -> Self
    where
        F: Fn(&FieldValue, &ValidationArguments<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            default_message: default_message.into(),
            options: ValidationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate element-wise when `each` is set.
    pub fn each(mut self, each: bool) -> Self {
        self.options.each = each;
        self
    }

    /// Override the default message.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.options.message = Some(message.into());
        self
    }

    fn check(&self, args: &ValidationArguments<'_>) -> bool {
        if !self.options.each {
            return (self.predicate)(args.value, args);
        }
        match args.value {
            FieldValue::Present(Value::Array(items)) => items
                .iter()
                .all(|item| (self.predicate)(&FieldValue::Present(item.clone()), args)),
            other => (self.predicate)(other, args),
        }
    }
}

impl fmt::Debug for ValidateBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateBy")
            .field("name", &self.name)
            .field("each", &self.options.each)
            .field("message", &self.options.message)
            .finish_non_exhaustive()
    }
}

impl ValidationRule for ValidateBy {
    fn validate(&self, args: &ValidationArguments<'_>) -> Result<(), RuleError> {
        let args = ValidationArguments {
            each: self.options.each,
            ..*args
        };
        if self.check(&args) {
            return Ok(());
        }
        let message = self
            .options
            .message
            .as_ref()
            .unwrap_or(&self.default_message)
            .render(&args);
        Err(RuleError::new(self.name.clone(), message))
    }

    fn rule_name(&self) -> &str {
        &self.name
    }
}

/// Custom validator built from a predicate and a message.
///
/// The message is used as given: with `each` set, a message factory decides
/// for itself whether to mention "each value in".
///
/// ```rust,ignore
/// let rule = CustomValidate::new(
///     |value, _| value.as_str().map_or(false, |s| s.starts_with("tenant-")),
///     Message::dynamic(|args| format!("{} must start with tenant-", args.property)),
/// );
/// ```
pub struct CustomValidate;

impl CustomValidate {
    pub const NAME: &'static str = "CustomValidate";

    #[allow(clippy::new_ret_no_self)]
    pub fn new<F>(predicate: F, message: impl Into<Message>) -> ValidateBy
    where
        F: Fn(&FieldValue, &ValidationArguments<'_>) -> bool + Send + Sync + 'static,
    {
        ValidateBy::new(Self::NAME, predicate, message)
    }

    /// Same as [`CustomValidate::new`] with explicit options. A message in
    /// `options` takes precedence over `message`.
    pub fn with_options<F>(
        predicate: F,
        message: impl Into<Message>,
        options: ValidationOptions,
    ) -> ValidateBy
    where
        F: Fn(&FieldValue, &ValidationArguments<'_>) -> bool + Send + Sync + 'static,
    {
        Self::new(predicate, message).with_options(options)
    }
}
