//! Optional-aware inbound transforms.

use crate::field::{Transform, TransformParams};
use apidto_validate::{FieldValue, TransformError};
use serde_json::Value;

/// Wrap a conversion so it only sees values that must be converted.
///
/// - missing key on an optional field: stays missing
/// - `null` on a nullable field: stays `null`
/// - any other missing or `null` value: fails with `"<key> does not exist"`
/// - a value an earlier transform rejected: passed through
///
/// Everything else goes through `f`; its error becomes the field's
/// validation message.
pub fn transform_handling_optional<F>(optional: bool, nullable: bool, f: F) -> Transform
where
    F: Fn(&TransformParams<'_>) -> Result<Value, TransformError> + Send + Sync + 'static,
{
    Transform::inbound(move |params| handle_optional(optional, nullable, params, &f))
}

fn handle_optional<F>(
    optional: bool,
    nullable: bool,
    params: &TransformParams<'_>,
    f: &F,
) -> FieldValue
where
    F: Fn(&TransformParams<'_>) -> Result<Value, TransformError>,
{
    match params.value {
        FieldValue::Absent if optional => FieldValue::Absent,
        FieldValue::Present(Value::Null) if nullable => FieldValue::Present(Value::Null),
        FieldValue::Absent | FieldValue::Present(Value::Null) => FieldValue::Failed(
            TransformError::new(format!("{} does not exist", params.key)),
        ),
        FieldValue::Failed(err) => FieldValue::Failed(err.clone()),
        FieldValue::Present(_) => f(params).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn double(params: &TransformParams<'_>) -> Result<Value, TransformError> {
        params
            .value
            .as_value()
            .and_then(Value::as_i64)
            .map(|n| json!(n * 2))
            .ok_or_else(|| TransformError::new(format!("{} is not a number", params.key)))
    }

    fn run(optional: bool, nullable: bool, value: FieldValue) -> FieldValue {
        transform_handling_optional(optional, nullable, double).apply("n", &value)
    }

    #[test]
    fn optional_absent_passes_through() {
        assert_eq!(run(true, false, FieldValue::Absent), FieldValue::Absent);
    }

    #[test]
    fn nullable_null_passes_through() {
        assert_eq!(
            run(false, true, FieldValue::Present(Value::Null)),
            FieldValue::Present(Value::Null)
        );
    }

    #[test]
    fn missing_values_fail_distinctly() {
        let absent = run(false, true, FieldValue::Absent);
        assert_eq!(absent.as_error().unwrap().message, "n does not exist");

        let null = run(true, false, FieldValue::Present(Value::Null));
        assert_eq!(null.as_error().unwrap().message, "n does not exist");
    }

    #[test]
    fn conversion_errors_become_values() {
        let failed = run(false, false, FieldValue::Present(json!("x")));
        assert_eq!(failed.as_error().unwrap().message, "n is not a number");
        assert_eq!(
            run(false, false, FieldValue::Present(json!(2))),
            FieldValue::Present(json!(4))
        );
    }
}
