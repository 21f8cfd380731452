mod common;

use apidto::prelude::*;
use common::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Inner {
    amount: f64,
}

dto!(Inner {
    amount => is_number(NumberOptions::new()),
});

mod single {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Test {
        inner: Inner,
    }

    dto!(Test {
        inner => is_nested(NestedOptions::<Inner>::new()),
    });

    #[test]
    fn generates_both_components() {
        assert_eq!(
            schemas::<Test>(),
            json!({
                "Inner": {
                    "type": "object",
                    "properties": {"amount": {"type": "number"}},
                    "required": ["amount"]
                },
                "Test": {
                    "type": "object",
                    "properties": {"inner": {"$ref": "#/components/schemas/Inner"}},
                    "required": ["inner"]
                }
            })
        );
    }

    #[test]
    fn accepts_nested_objects() {
        assert_eq!(
            accept::<Test>(json!({"inner": {"amount": 1}})),
            Test { inner: Inner { amount: 1.0 } }
        );
    }

    #[test]
    fn reports_nested_errors() {
        assert_eq!(
            reject::<Test>(json!({"inner": {"amount": "abc"}})),
            "amount must be a number conforming to the specified constraints"
        );
        assert_eq!(
            reject::<Test>(json!({"inner": {"amount": 1, "extra": true}})),
            "property extra should not exist"
        );
    }

    #[test]
    fn rejects_everything_else() {
        reject_all::<Test>(
            vec![
                json!({"inner": "abc"}),
                json!({"inner": false}),
                json!({"inner": []}),
                json!({"inner": 0}),
                json!({"inner": null}),
                json!({}),
            ],
            "nested property inner must be an object",
        );
    }

    #[test]
    fn error_paths_are_dotted() {
        let err = apidto::input::<Test>(json!({"inner": {"amount": "abc"}})).unwrap_err();
        let DtoError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "inner.amount");
    }
}

mod array {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Test {
        inners: Vec<Inner>,
    }

    dto!(Test {
        inners => is_nested(NestedOptions::<Inner>::new().array()),
    });

    #[test]
    fn generates_schema() {
        assert_eq!(
            schemas::<Test>()["Test"]["properties"]["inners"],
            json!({"type": "array", "items": {"$ref": "#/components/schemas/Inner"}})
        );
    }

    #[test]
    fn accepts_nested_arrays() {
        assert_eq!(
            accept::<Test>(json!({"inners": [{"amount": 1}, {"amount": 2}, {"amount": 3}]})),
            Test {
                inners: vec![
                    Inner { amount: 1.0 },
                    Inner { amount: 2.0 },
                    Inner { amount: 3.0 },
                ]
            }
        );
        assert_eq!(accept::<Test>(json!({"inners": []})), Test { inners: vec![] });
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(
            reject::<Test>(json!({"inners": [{"a": 1}, {"b": 2}, {"c": 3}]})),
            "property a should not exist"
        );
        assert_eq!(reject::<Test>(json!({"inners": true})), "inners must be an array");
        assert_eq!(
            reject::<Test>(json!({"inners": ["a", "b", "c"]})),
            "nested property inners must only contain objects"
        );
    }

    #[test]
    fn element_errors_are_keyed_by_index() {
        let err = apidto::input::<Test>(json!({"inners": [{"amount": 1}, {"amount": "x"}]}))
            .unwrap_err();
        let DtoError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.field_errors()[0].field, "inners.1.amount");
    }
}

mod renamed {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Address {
        zip_code: String,
    }

    dto!(Address {
        zip_code => is_string(StringOptions::new().name("zipCode")),
    });

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Customer {
        home_address: Address,
    }

    dto!(Customer {
        home_address => is_nested(NestedOptions::<Address>::new().name("homeAddress")),
    });

    #[test]
    fn renames_apply_at_every_level() {
        let wire = json!({"homeAddress": {"zipCode": "00-950"}});
        let customer: Customer = accept(wire.clone());
        assert_eq!(customer.home_address.zip_code, "00-950");
        assert_eq!(to_plain(&customer), wire);
    }
}

mod recursive {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Category {
        label: String,
        children: Vec<Category>,
    }

    dto!(Category {
        label => is_string(StringOptions::new()),
        children => is_nested(NestedOptions::<Category>::new().array()),
    });

    #[test]
    fn self_reference_terminates() {
        assert_eq!(
            schemas::<Category>(),
            json!({
                "Category": {
                    "type": "object",
                    "properties": {
                        "label": {"type": "string"},
                        "children": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/Category"}
                        }
                    },
                    "required": ["label", "children"]
                }
            })
        );
    }

    #[test]
    fn binds_every_level() {
        let tree: Category = accept(json!({
            "label": "root",
            "children": [{"label": "leaf", "children": []}]
        }));
        assert_eq!(tree.children[0].label, "leaf");
        assert_eq!(
            reject::<Category>(json!({
                "label": "root",
                "children": [{"label": 1, "children": []}]
            })),
            "label must be a string"
        );
    }
}
