//! Structural validation of nested selection queries.
//!
//! A query document is a tree of property selections, much like a GraphQL
//! selection set expressed as JSON. This library checks such a document
//! against a statically declared [`Schema`] of entities, structs, unions,
//! enums, scalars, and entity identifiers, and fails with a path-qualified
//! [`ValidationError`] on the first violation. It validates shape only; it
//! never resolves data.
//!
//! # Example
//!
//! ```
//! use query_validator::{Schema, ValidationErrorKind, validate};
//! use serde_json::json;
//!
//! let schema = Schema::example();
//!
//! let query = json!({
//!     "users": {
//!         "listArgs": {"limit": 10},
//!         "select": {
//!             "name": {"select": {"first": {}}},
//!             "partner": {"accept": {"String": {}}}
//!         }
//!     },
//!     "users = @everyone": {"listArgs": {"limit": 1}}
//! });
//! assert!(validate(&schema, &query).is_ok());
//!
//! let err = validate(&schema, &json!({"users": {"listArgs": {"after": "x"}}})).unwrap_err();
//! assert_eq!(err.kind(), ValidationErrorKind::MissingPageLimitArgument);
//! assert_eq!(err.to_string(), "root.users: missing page limit argument");
//! ```

pub mod diag;
pub mod lexer;
pub mod schema;
pub mod validator;

pub use diag::{ValidationError, ValidationErrorKind, ValidationResult};
pub use schema::{
    ArgumentDecl, Attribute, AttributeSet, Primitive, PropertyDecl, Schema, SchemaBuilder,
    SchemaError, TypeDef, TypeId, TypeKind,
};
pub use validator::{PathContext, ValidationConfig, Validator};

/// Validates `document` against `schema` with the default configuration.
pub fn validate(schema: &Schema, document: &serde_json::Value) -> ValidationResult {
    Validator::new(schema).validate(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn public_api_accessible() {
        let schema = Schema::example();
        assert!(validate(&schema, &json!({"users": {"listArgs": {"limit": 1}}})).is_ok());
        let _ctx: PathContext<'_> = PathContext::root();
        let _config = ValidationConfig::default();
    }
}
