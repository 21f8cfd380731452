//! # apidto Validation
//!
//! Rule engine behind apidto field specs. A rule receives the property name
//! and its value after inbound transforms, and reports a [`RuleError`] with a
//! conventional message on failure.
//!
//! ## Example
//!
//! ```rust,ignore
//! use apidto_validate::prelude::*;
//! use serde_json::json;
//!
//! let rule = rules::length(2, Some(2), false);
//! let value = FieldValue::Present(json!("USA"));
//! let err = rule.validate(&ValidationArguments::new("countryCode", &value)).unwrap_err();
//! assert_eq!(err.message, "countryCode must be shorter than or equal to 2 characters");
//! ```
//!
//! ## Error Format
//!
//! [`ValidationErrors`] keeps property errors in evaluation order and nests
//! the errors of child DTOs. Rendered for an API response:
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "message": "Validation failed",
//!     "fields": [
//!       {"field": "items.0.name", "code": "isString", "message": "name must be a string"}
//!     ]
//!   }
//! }
//! ```

mod custom;
pub mod date;
mod error;
pub mod rules;
mod traits;
mod value;

pub use custom::{CustomValidate, Message, Predicate, ValidateBy, ValidationOptions};
pub use error::{
    ApiValidationError, ErrorBody, FieldErrorResponse, RuleError, ValidationError,
    ValidationErrors,
};
pub use traits::{ValidationArguments, ValidationRule};
pub use value::{display_constraint, FieldValue, TransformError};

/// Prelude module for validation
pub mod prelude {
    pub use crate::custom::{CustomValidate, Message, ValidateBy, ValidationOptions};
    pub use crate::error::{RuleError, ValidationError, ValidationErrors};
    pub use crate::rules;
    pub use crate::traits::{ValidationArguments, ValidationRule};
    pub use crate::value::{FieldValue, TransformError};
}
