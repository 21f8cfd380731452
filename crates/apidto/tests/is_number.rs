mod common;

use apidto::prelude::*;
use common::*;

const NOT_A_NUMBER: &str = "value must be a number conforming to the specified constraints";

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Single {
    value: f64,
}

dto!(Single {
    value => is_number(NumberOptions::new()),
});

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Bounded {
    value: f64,
}

dto!(Bounded {
    value => is_number(NumberOptions::new().min(5.0).max(10.0)),
});

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Stringified {
    value: f64,
}

dto!(Stringified {
    value => is_number(NumberOptions::new().stringified()),
});

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Integer {
    value: f64,
}

dto!(Integer {
    value => is_number(
        NumberOptions::new()
            .integer_format(IntegerFormat::Int32)
            .example(5)
    ),
});

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Many {
    values: Vec<f64>,
}

dto!(Many {
    values => is_number(NumberOptions::new().array()),
});

#[test]
fn accepts_numbers() {
    assert_eq!(accept::<Single>(json!({"value": 1})), Single { value: 1.0 });
    assert_eq!(accept::<Single>(json!({"value": 1.1})), Single { value: 1.1 });
}

#[test]
fn rejects_everything_else() {
    reject_all::<Single>(
        vec![
            json!({"value": "true"}),
            json!({"value": "1"}),
            json!({"value": []}),
            json!({"value": {}}),
            json!({"value": null}),
            json!({}),
        ],
        NOT_A_NUMBER,
    );
}

#[test]
fn checks_bounds() {
    assert_eq!(accept::<Bounded>(json!({"value": 5})), Bounded { value: 5.0 });
    assert_eq!(
        reject::<Bounded>(json!({"value": 1})),
        "value must not be less than 5"
    );
    assert_eq!(
        reject::<Bounded>(json!({"value": 11})),
        "value must not be greater than 10"
    );
    assert_eq!(reject::<Bounded>(json!({"value": false})), NOT_A_NUMBER);
}

#[test]
fn bounds_are_documented() {
    assert_eq!(
        schemas::<Bounded>()["Bounded"]["properties"]["value"],
        json!({"type": "number", "minimum": 5.0, "maximum": 10.0})
    );
}

#[test]
fn stringified_accepts_numeric_strings() {
    assert_eq!(accept::<Stringified>(json!({"value": "10"})), Stringified { value: 10.0 });
    assert_eq!(accept::<Stringified>(json!({"value": "-10.5"})), Stringified { value: -10.5 });
    assert_eq!(accept::<Stringified>(json!({"value": -10.5})), Stringified { value: -10.5 });
}

#[test]
fn stringified_rejects_padded_strings() {
    reject_all::<Stringified>(
        vec![
            json!({"value": "true"}),
            json!({"value": "1 "}),
            json!({"value": " 1"}),
            json!({"value": []}),
            json!({"value": null}),
            json!({}),
        ],
        NOT_A_NUMBER,
    );
}

#[test]
fn integers_reject_fractions_but_output_keeps_them() {
    assert_eq!(accept::<Integer>(json!({"value": 3})), Integer { value: 3.0 });
    assert_eq!(reject::<Integer>(json!({"value": 3.5})), NOT_A_NUMBER);
    assert_eq!(to_plain(&Integer { value: 3.5 }), json!({"value": 3.5}));
}

#[test]
fn integer_schema_has_format_and_example() {
    assert_eq!(
        schemas::<Integer>()["Integer"]["properties"]["value"],
        json!({"type": "integer", "format": "int32", "example": 5})
    );
}

#[test]
fn arrays_check_each_element() {
    assert_eq!(accept::<Many>(json!({"values": [1, 2, 3]})), Many { values: vec![1.0, 2.0, 3.0] });
    assert_eq!(accept::<Many>(json!({"values": []})), Many { values: vec![] });
    assert_eq!(
        reject::<Many>(json!({"values": true})),
        "each value in values must be a number conforming to the specified constraints"
    );
    assert_eq!(
        reject::<Many>(json!({"values": ["a", "b"]})),
        "each value in values must be a number conforming to the specified constraints"
    );
}
