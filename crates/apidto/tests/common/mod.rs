//! Helpers shared by the integration tests.

#![allow(dead_code)]

use apidto::{generate_schemas, input, output, Dto, DtoError};
use serde_json::Value;
use std::fmt::Debug;

/// Install a test subscriber so binding logs show up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("apidto_core=trace")
        .with_test_writer()
        .try_init();
}

/// Bind `value`, panicking with the first message on rejection.
pub fn accept<T: Dto>(value: Value) -> T {
    match input::<T>(value) {
        Ok(dto) => dto,
        Err(err) => panic!("input rejected: {err}"),
    }
}

/// First message of a rejected input, the way callers usually report it.
pub fn reject<T: Dto + Debug>(value: Value) -> String {
    match input::<T>(value) {
        Ok(dto) => panic!("input accepted: {dto:?}"),
        Err(DtoError::Validation(errors)) => errors
            .first_message()
            .map(str::to_string)
            .unwrap_or_default(),
        Err(err) => panic!("unexpected error: {err}"),
    }
}

/// Assert that every value is rejected with `message`.
pub fn reject_all<T: Dto + Debug>(values: Vec<Value>, message: &str) {
    for value in values {
        assert_eq!(reject::<T>(value.clone()), message, "input: {value}");
    }
}

pub fn to_plain<T: Dto>(dto: &T) -> Value {
    output(dto).expect("output failed")
}

/// Components generated for `T` and the DTOs it nests.
pub fn schemas<T: Dto>() -> Value {
    serde_json::to_value(generate_schemas(&[T::schema()])).expect("schemas serialize")
}
