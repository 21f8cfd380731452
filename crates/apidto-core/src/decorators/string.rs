use super::DateFormat;
use crate::compose::compose;
use crate::field::{Behavior, FieldSpec};
use crate::options::{impl_property_options, PropertyOptions};
use apidto_openapi::JsonSchema;
use apidto_validate::{rules, Message, ValidateBy};
use regex::Regex;

/// Regular expression a string must match, with an optional message
/// replacing the default one.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub regex: Regex,
    pub message: Option<Message>,
}

impl Pattern {
    pub fn new(regex: Regex) -> Self {
        Self {
            regex,
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::new(regex)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    base: PropertyOptions<String>,
    can_be_empty: Option<bool>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Pattern>,
    is_email: bool,
    is_date: Option<DateFormat>,
    custom_validate: Option<ValidateBy>,
}

impl StringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// `false` rejects `""`.
    pub fn can_be_empty(mut self, can_be_empty: bool) -> Self {
        self.can_be_empty = Some(can_be_empty);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<Pattern>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn email(mut self) -> Self {
        self.is_email = true;
        self
    }

    /// Check the shape of a date (`yyyy-mm-dd`) or ISO-8601 date-time string
    /// without converting it.
    pub fn date(mut self, format: DateFormat) -> Self {
        self.is_date = Some(format);
        self
    }

    /// Extra rule, usually built with `CustomValidate::new`.
    pub fn custom_validate(mut self, rule: ValidateBy) -> Self {
        self.custom_validate = Some(rule);
        self
    }
}

impl_property_options!(StringOptions, String);

pub fn is_string(options: StringOptions) -> FieldSpec {
    let each = options.base.is_array();

    let mut fragment = JsonSchema::string();
    fragment.min_length = options.min_length.map(|n| n as u64);
    fragment.max_length = options.max_length.map(|n| n as u64);
    if options.is_email {
        fragment.format = Some("email".to_string());
    }
    if let Some(format) = options.is_date {
        fragment.format = Some(format.as_str().to_string());
    }
    fragment.pattern = options
        .pattern
        .as_ref()
        .map(|pattern| pattern.regex.as_str().to_string());

    let mut extras = vec![Behavior::rule(rules::is_string(each))];
    if options.can_be_empty == Some(false) {
        extras.push(Behavior::rule(rules::is_not_empty(each)));
    }
    if options.min_length.is_some() || options.max_length.is_some() {
        extras.push(Behavior::rule(rules::length(
            options.min_length.unwrap_or(0),
            options.max_length,
            each,
        )));
    }
    if options.is_email {
        extras.push(Behavior::rule(rules::is_email(each)));
    }
    if let Some(Pattern { regex, message }) = options.pattern {
        let rule = rules::matches(regex, each);
        extras.push(Behavior::rule(match message {
            Some(message) => rule.message(message),
            None => rule,
        }));
    }
    match options.is_date {
        Some(DateFormat::Date) => extras.push(Behavior::rule(rules::is_date_string(each))),
        Some(DateFormat::DateTime) => extras.push(Behavior::rule(rules::is_iso8601_string(each))),
        None => {}
    }
    if let Some(rule) = options.custom_validate {
        extras.push(Behavior::rule(rule.each(each)));
    }

    compose(fragment, &options.base, extras)
}
