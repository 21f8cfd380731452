mod common;

use apidto::prelude::*;
use common::*;
use proptest::prelude::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Tags {
    tags: Vec<String>,
}

dto!(Tags {
    tags => is_string(StringOptions::new().max_length(8).array()),
});

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Page {
    page: i64,
}

dto!(Page {
    page => is_number(NumberOptions::new().integer().stringified()),
});

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Code {
    code: String,
}

dto!(Code {
    code => is_string(StringOptions::new().min_length(2).max_length(4)),
});

proptest! {
    #[test]
    fn valid_arrays_survive_input_and_output(tags in prop::collection::vec("[a-z]{0,8}", 0..6)) {
        let wire = json!({ "tags": tags.clone() });
        let dto: Tags = accept(wire.clone());
        prop_assert_eq!(&dto.tags, &tags);
        prop_assert_eq!(to_plain(&dto), wire);
    }

    #[test]
    fn numeric_query_strings_bind_as_integers(page in any::<i32>()) {
        let query = TypedQuery::<Page>::from_query(&format!("page={page}")).unwrap();
        prop_assert_eq!(query.page, i64::from(page));
    }

    #[test]
    fn non_numeric_strings_are_rejected(raw in "[a-z ]{1,6}") {
        prop_assert_eq!(
            reject::<Page>(json!({ "page": raw })),
            "page must be a number conforming to the specified constraints"
        );
    }

    #[test]
    fn length_message_names_the_broken_bound(code in "[A-Z]{0,8}") {
        let len = code.chars().count();
        let result = apidto::input::<Code>(json!({ "code": code.clone() }));
        match len {
            2..=4 => prop_assert!(result.is_ok()),
            0 | 1 => prop_assert_eq!(
                reject::<Code>(json!({ "code": code })),
                "code must be longer than or equal to 2 characters"
            ),
            _ => prop_assert_eq!(
                reject::<Code>(json!({ "code": code })),
                "code must be shorter than or equal to 4 characters"
            ),
        }
    }
}
