//! Built-in constraint rules.
//!
//! Every constructor returns a [`ValidateBy`] whose default message follows
//! the conventional wording (`"<property> must be a string"`). Passing
//! `each = true` checks array elements individually and prefixes the
//! default message with `"each value in "`.

use crate::custom::{Message, ValidateBy};
use crate::date;
use crate::traits::ValidationArguments;
use crate::value::{display_constraint, FieldValue};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified email regex
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
        ).unwrap()
    })
}

/// Default message `"<each prefix><property> <text>"`.
fn prefixed(text: impl Into<String>) -> Message {
    let text = text.into();
    Message::dynamic(move |args| format!("{}{} {text}", args.each_prefix(), args.property))
}

fn number(value: &FieldValue) -> Option<f64> {
    value.as_value().and_then(Value::as_f64)
}

pub fn is_boolean(each: bool) -> ValidateBy {
    ValidateBy::new(
        "isBoolean",
        |value, _| matches!(value, FieldValue::Present(Value::Bool(_))),
        prefixed("must be a boolean value"),
    )
    .each(each)
}

/// Finite JSON number; `integer` additionally rejects decimal places.
pub fn is_number(integer: bool, each: bool) -> ValidateBy {
    ValidateBy::new(
        "isNumber",
        move |value, _| match number(value) {
            Some(n) if integer => n.is_finite() && n.fract() == 0.0,
            Some(n) => n.is_finite(),
            None => false,
        },
        prefixed("must be a number conforming to the specified constraints"),
    )
    .each(each)
}

pub fn min(limit: f64, each: bool) -> ValidateBy {
    ValidateBy::new(
        "min",
        move |value, _| number(value).is_some_and(|n| n >= limit),
        prefixed(format!("must not be less than {limit}")),
    )
    .each(each)
}

pub fn max(limit: f64, each: bool) -> ValidateBy {
    ValidateBy::new(
        "max",
        move |value, _| number(value).is_some_and(|n| n <= limit),
        prefixed(format!("must not be greater than {limit}")),
    )
    .each(each)
}

pub fn is_string(each: bool) -> ValidateBy {
    ValidateBy::new(
        "isString",
        |value, _| value.as_str().is_some(),
        prefixed("must be a string"),
    )
    .each(each)
}

/// Rejects `""`, `null` and missing values.
pub fn is_not_empty(each: bool) -> ValidateBy {
    ValidateBy::new(
        "isNotEmpty",
        |value, _| match value {
            FieldValue::Present(Value::String(s)) => !s.is_empty(),
            FieldValue::Present(Value::Null) | FieldValue::Absent => false,
            _ => true,
        },
        prefixed("should not be empty"),
    )
    .each(each)
}

fn length_ok(value: &FieldValue, min: usize, max: Option<usize>) -> bool {
    match value.as_str() {
        Some(s) => {
            let len = s.chars().count();
            len >= min && max.map_or(true, |max| len <= max)
        }
        None => false,
    }
}

/// String length in characters. The message names whichever bound the
/// offending value breaks; non-strings report the lower bound.
pub fn length(min: usize, max: Option<usize>, each: bool) -> ValidateBy {
    let message = Message::dynamic(move |args: &ValidationArguments<'_>| {
        let offending = match args.value {
            FieldValue::Present(Value::Array(items)) if args.each => items
                .iter()
                .find(|item| !length_ok(&FieldValue::Present((*item).clone()), min, max))
                .and_then(Value::as_str)
                .map(|s| s.chars().count()),
            other => other.as_str().map(|s| s.chars().count()),
        };
        let prefix = args.each_prefix();
        let property = args.property;
        match (offending, max) {
            (Some(len), Some(max)) if len >= min && len > max => {
                format!("{prefix}{property} must be shorter than or equal to {max} characters")
            }
            _ => format!("{prefix}{property} must be longer than or equal to {min} characters"),
        }
    });
    ValidateBy::new(
        "isLength",
        move |value, _| length_ok(value, min, max),
        message,
    )
    .each(each)
}

pub fn is_email(each: bool) -> ValidateBy {
    ValidateBy::new(
        "isEmail",
        |value, _| value.as_str().is_some_and(|s| email_regex().is_match(s)),
        prefixed("must be an email"),
    )
    .each(each)
}

pub fn matches(regex: Regex, each: bool) -> ValidateBy {
    let message = prefixed(format!("must match /{}/ regular expression", regex.as_str()));
    ValidateBy::new(
        "matches",
        move |value, _| value.as_str().is_some_and(|s| regex.is_match(s)),
        message,
    )
    .each(each)
}

pub fn is_in(allowed: Vec<Value>, each: bool) -> ValidateBy {
    let message = prefixed(format!(
        "must be one of the following values: {}",
        display_constraint(&Value::Array(allowed.clone()))
    ));
    ValidateBy::new(
        "isIn",
        move |value, _| value.as_value().is_some_and(|v| allowed.contains(v)),
        message,
    )
    .each(each)
}

/// Structural equality with `expected`.
pub fn equals(expected: Value, each: bool) -> ValidateBy {
    let message = prefixed(format!("must be equal to {}", display_constraint(&expected)));
    ValidateBy::new(
        "equals",
        move |value, _| value.as_value() == Some(&expected),
        message,
    )
    .each(each)
}

/// Non-null object that is not an array.
pub fn is_object(each: bool) -> ValidateBy {
    ValidateBy::new(
        "isObject",
        |value, _| matches!(value, FieldValue::Present(Value::Object(_))),
        prefixed("must be an object"),
    )
    .each(each)
}

pub fn is_array() -> ValidateBy {
    ValidateBy::new(
        "isArray",
        |value, _| matches!(value, FieldValue::Present(Value::Array(_))),
        prefixed("must be an array"),
    )
}

pub fn array_min_size(min: usize) -> ValidateBy {
    ValidateBy::new(
        "arrayMinSize",
        move |value, _| matches!(value, FieldValue::Present(Value::Array(items)) if items.len() >= min),
        prefixed(format!("must contain at least {min} elements")),
    )
}

pub fn array_max_size(max: usize) -> ValidateBy {
    ValidateBy::new(
        "arrayMaxSize",
        move |value, _| matches!(value, FieldValue::Present(Value::Array(items)) if items.len() <= max),
        prefixed(format!("must contain no more than {max} elements")),
    )
}

pub fn is_defined() -> ValidateBy {
    ValidateBy::new(
        "isDefined",
        |value, _| !value.is_nullish(),
        prefixed("should not be null or undefined"),
    )
}

/// Passes a value the date transform parsed; a failed transform reports
/// its own message.
pub fn is_date(each: bool) -> ValidateBy {
    let message = Message::dynamic(|args: &ValidationArguments<'_>| match args.value.as_error() {
        Some(err) => err.message.clone(),
        None => format!("{}{} must be a Date instance", args.each_prefix(), args.property),
    });
    ValidateBy::new(
        "isDate",
        |value, _| value.as_str().is_some_and(|s| date::parse_iso8601(s).is_some()),
        message,
    )
    .each(each)
}

/// Object key count lower bound. Anything other than an object passes;
/// presence and shape are checked by other rules.
pub fn min_properties(min: usize, each: bool) -> ValidateBy {
    ValidateBy::new(
        "minProperties",
        move |value, _| match value {
            FieldValue::Present(Value::Object(map)) => map.len() >= min,
            _ => true,
        },
        prefixed(format!("must have at least {min} properties")),
    )
    .each(each)
}

pub fn max_properties(max: usize, each: bool) -> ValidateBy {
    ValidateBy::new(
        "maxProperties",
        move |value, _| match value {
            FieldValue::Present(Value::Object(map)) => map.len() <= max,
            _ => true,
        },
        prefixed(format!("must have at most {max} properties")),
    )
    .each(each)
}

/// `yyyy-mm-dd` string naming a real calendar day.
pub fn is_date_string(each: bool) -> ValidateBy {
    crate::custom::CustomValidate::new(
        |value, _| value.as_str().is_some_and(|s| date::parse_date(s).is_some()),
        Message::dynamic(|args| {
            format!(
                "{} is not formatted as `yyyy-mm-dd` or not a valid Date",
                args.property
            )
        }),
    )
    .each(each)
}

/// Strict ISO-8601 date-time string.
pub fn is_iso8601_string(each: bool) -> ValidateBy {
    crate::custom::CustomValidate::new(
        |value, _| value.as_str().is_some_and(|s| date::parse_iso8601(s).is_some()),
        Message::dynamic(|args| format!("{} is not in a ISO8601 format.", args.property)),
    )
    .each(each)
}
