mod common;

use apidto::prelude::*;
use common::*;

mod value_list {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Test {
        level: i64,
    }

    dto!(Test {
        level => is_enum(EnumOptions::from_record([("OneOrTwo", vec![1, 2])]).unwrap()),
    });

    #[test]
    fn generates_schema() {
        assert_eq!(
            schemas::<Test>(),
            json!({
                "OneOrTwo": {"type": "number", "enum": [1, 2]},
                "Test": {
                    "type": "object",
                    "properties": {"level": {"$ref": "#/components/schemas/OneOrTwo"}},
                    "required": ["level"]
                }
            })
        );
    }

    #[test]
    fn accepts_listed_values() {
        assert_eq!(accept::<Test>(json!({"level": 1})), Test { level: 1 });
        assert_eq!(accept::<Test>(json!({"level": 2})), Test { level: 2 });
    }

    #[test]
    fn rejects_everything_else() {
        reject_all::<Test>(
            vec![
                json!({"level": "true"}),
                json!({"level": "1"}),
                json!({"level": 0}),
                json!({"level": []}),
                json!({"level": {}}),
                json!({"level": null}),
                json!({}),
            ],
            "level must be one of the following values: 1, 2",
        );
    }
}

mod rust_enum {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    enum Switch {
        On,
        Off,
    }

    impl DtoEnum for Switch {
        const NAME: &'static str = "Switch";

        fn variants() -> Vec<Self> {
            vec![Self::On, Self::Off]
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Test {
        switch: Switch,
    }

    dto!(Test {
        switch => is_enum(EnumOptions::<Switch>::of().unwrap()),
    });

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Other {
        state: Option<Switch>,
    }

    dto!(Other {
        state => is_enum(EnumOptions::<Switch>::of().unwrap().optional()),
    });

    #[test]
    fn generates_schema() {
        assert_eq!(
            schemas::<Test>(),
            json!({
                "Switch": {"type": "string", "enum": ["On", "Off"]},
                "Test": {
                    "type": "object",
                    "properties": {"switch": {"$ref": "#/components/schemas/Switch"}},
                    "required": ["switch"]
                }
            })
        );
    }

    #[test]
    fn dtos_share_the_component() {
        let components = apidto::generate_schemas(&[Test::schema(), Other::schema()]);
        assert_eq!(
            components.keys().collect::<Vec<_>>(),
            vec!["Other", "Switch", "Test"]
        );
        assert_eq!(
            components["Other"]["properties"]["state"],
            json!({"$ref": "#/components/schemas/Switch"})
        );
    }

    #[test]
    fn accepts_variants() {
        assert_eq!(accept::<Test>(json!({"switch": "On"})), Test { switch: Switch::On });
        assert_eq!(accept::<Test>(json!({"switch": "Off"})), Test { switch: Switch::Off });
        assert_eq!(to_plain(&Test { switch: Switch::Off }), json!({"switch": "Off"}));
    }

    #[test]
    fn rejects_everything_else() {
        reject_all::<Test>(
            vec![
                json!({"switch": true}),
                json!({"switch": "on"}),
                json!({"switch": 0}),
                json!({"switch": []}),
                json!({"switch": null}),
                json!({}),
            ],
            "switch must be one of the following values: On, Off",
        );
    }
}

mod configuration {
    use super::*;

    #[test]
    fn record_must_have_exactly_one_entry() {
        let empty: Vec<(&str, Vec<i32>)> = Vec::new();
        let err = EnumOptions::from_record(empty).unwrap_err();
        assert_eq!(err.to_string(), "EnumOptions object should have exactly one key");

        let err = EnumOptions::from_record([("a", vec![1, 2, 3]), ("b", vec![3, 4, 5])])
            .unwrap_err();
        assert_eq!(err, ConfigError::EnumOptionsShape);
    }

    #[test]
    fn name_must_be_an_identifier() {
        assert!(matches!(
            EnumOptions::named("Not valid", ["a"]),
            Err(ConfigError::InvalidEnumName(name)) if name == "Not valid"
        ));
        assert!(EnumOptions::named("1st", ["a"]).is_err());
    }
}

mod array {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Test {
        letters: Vec<String>,
    }

    dto!(Test {
        letters => is_enum(EnumOptions::named("AOrB", ["a", "b"]).unwrap().array()),
    });

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Filter {
        letters: Option<Vec<String>>,
    }

    dto!(Filter {
        letters => is_enum(
            EnumOptions::named("Letter", ["a", "b"])
                .unwrap()
                .optional()
                .array_shape(ArrayShape::new().min_length(1).max_length(2).force())
        ),
    });

    #[test]
    fn generates_schema() {
        assert_eq!(
            schemas::<Test>(),
            json!({
                "AOrB": {"type": "string", "enum": ["a", "b"]},
                "Test": {
                    "type": "object",
                    "properties": {
                        "letters": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/AOrB"}
                        }
                    },
                    "required": ["letters"]
                }
            })
        );
    }

    #[test]
    fn query_parameter_keeps_the_reference() {
        let mut spec = OpenApiSpec::new("Letters", "1.0.0");
        let parameters = spec.parameters_for::<Filter>(ParameterIn::Query);
        assert_eq!(
            serde_json::to_value(&parameters).unwrap(),
            json!([{
                "name": "letters",
                "in": "query",
                "required": false,
                "schema": {
                    "type": "array",
                    "items": {"$ref": "#/components/schemas/Letter"},
                    "minItems": 1,
                    "maxItems": 2
                }
            }])
        );
        assert!(spec.components.contains("Letter"));
    }

    #[test]
    fn forced_query_value_becomes_an_array() {
        let query = TypedQuery::<Filter>::from_query("letters=a").unwrap();
        assert_eq!(query.letters, Some(vec!["a".to_string()]));
    }

    #[test]
    fn accepts_enum_arrays() {
        assert_eq!(
            accept::<Test>(json!({"letters": ["a", "b"]})),
            Test { letters: vec!["a".into(), "b".into()] }
        );
        assert_eq!(accept::<Test>(json!({"letters": []})), Test { letters: vec![] });
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(
            reject::<Test>(json!({"letters": true})),
            "each value in letters must be one of the following values: a, b"
        );
        assert_eq!(
            reject::<Test>(json!({"letters": ["a", "b", "c"]})),
            "each value in letters must be one of the following values: a, b"
        );
    }
}
