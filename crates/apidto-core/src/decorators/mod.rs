//! Field decorators, one per value type.
//!
//! Each decorator takes its options struct and returns the [`FieldSpec`]
//! built by [`compose`](crate::compose::compose).
//!
//! [`FieldSpec`]: crate::field::FieldSpec

mod boolean;
mod constant;
mod date;
mod enumeration;
mod nested;
mod number;
mod object;
mod string;
mod unknown;

pub use boolean::{is_boolean, BooleanOptions};
pub use constant::{is_constant, ConstantOptions};
pub use date::{is_date, DateFormat, DateOptions};
pub use enumeration::{is_enum, EnumOptions};
pub use nested::{is_nested, NestedOptions};
pub use number::{is_number, FloatFormat, IntegerFormat, NumberKind, NumberOptions};
pub use object::{is_object, ObjectOptions};
pub use string::{is_string, Pattern, StringOptions};
pub use unknown::{is_unknown, UnknownOptions};

use serde_json::Value;

/// Apply `f` to a scalar, or to every element of an array.
pub(crate) fn map_scalars(value: Value, f: impl Fn(Value) -> Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(f).collect()),
        scalar => f(scalar),
    }
}
