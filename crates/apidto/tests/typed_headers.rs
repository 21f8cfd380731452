mod common;

use apidto::http::{Request, StatusCode};
use apidto::prelude::*;
use common::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct CountryHeaders {
    country_code: String,
    timestamp: String,
}

dto!(CountryHeaders {
    country_code => is_string(
        StringOptions::new()
            .name("country-code")
            .description("[ISO_3166-1_alpha-2](https://en.wikipedia.org/wiki/ISO_3166-1_alpha-2)")
            .min_length(2)
            .max_length(2)
            .example("US")
    ),
    timestamp => is_string(
        StringOptions::new()
            .date(DateFormat::DateTime)
            .example("2011-12-01T00:00:00.000Z")
            .description("[ISO 8601](https://en.wikipedia.org/wiki/ISO_8601)")
    ),
});

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Forwarded {
    forwarded_for: Option<String>,
}

dto!(Forwarded {
    forwarded_for => is_string(StringOptions::new().name("x-forwarded-for").optional()),
});

fn parts(headers: &[(&str, &str)]) -> apidto::http::request::Parts {
    let mut builder = Request::builder().uri("/test");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let (parts, ()) = builder.body(()).expect("valid request").into_parts();
    parts
}

#[test]
fn binds_headers_case_insensitively() {
    init_tracing();
    let parts = parts(&[
        ("Country-Code", "US"),
        ("Timestamp", "2011-12-01T00:00:00.000Z"),
        ("Accept", "*/*"),
    ]);

    let headers = TypedHeaders::<CountryHeaders>::from_request_parts(&parts).unwrap();
    assert_eq!(headers.country_code, "US");
    assert_eq!(
        headers.into_inner(),
        CountryHeaders {
            country_code: "US".into(),
            timestamp: "2011-12-01T00:00:00.000Z".into(),
        }
    );
}

#[test]
fn rejects_with_every_message_in_order() {
    init_tracing();
    let parts = parts(&[("Country-Code", "USA")]);

    let err = TypedHeaders::<CountryHeaders>::from_request_parts(&parts).unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        err.messages,
        vec![
            "country_code must be shorter than or equal to 2 characters",
            "timestamp must be a string",
            "timestamp is not in a ISO8601 format.",
        ]
    );

    let body = err.to_json();
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["error"]["fields"][0]["field"], "country_code");
}

#[test]
fn repeated_headers_are_joined() {
    let parts = parts(&[
        ("X-Forwarded-For", "10.0.0.1"),
        ("x-forwarded-for", "10.0.0.2"),
    ]);
    let TypedHeaders(forwarded) = TypedHeaders::<Forwarded>::from_request_parts(&parts).unwrap();
    assert_eq!(forwarded.forwarded_for.as_deref(), Some("10.0.0.1, 10.0.0.2"));

    let TypedHeaders(none) = TypedHeaders::<Forwarded>::from_request_parts(&self::parts(&[])).unwrap();
    assert_eq!(none.forwarded_for, None);
}

#[test]
fn documents_header_parameters() {
    let mut spec = OpenApiSpec::new("Countries", "1.0.0");
    let parameters = spec.parameters_for::<CountryHeaders>(ParameterIn::Header);
    assert_eq!(
        serde_json::to_value(&parameters).unwrap(),
        json!([
            {
                "name": "country-code",
                "in": "header",
                "required": true,
                "description": "[ISO_3166-1_alpha-2](https://en.wikipedia.org/wiki/ISO_3166-1_alpha-2)",
                "schema": {"type": "string", "minLength": 2, "maxLength": 2, "example": "US"}
            },
            {
                "name": "timestamp",
                "in": "header",
                "required": true,
                "description": "[ISO 8601](https://en.wikipedia.org/wiki/ISO_8601)",
                "schema": {
                    "type": "string",
                    "format": "date-time",
                    "example": "2011-12-01T00:00:00.000Z"
                }
            }
        ])
    );
}
