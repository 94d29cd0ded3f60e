//! Argument names and literal values.

mod common;

use common::*;
use query_validator::{Schema, ValidationErrorKind, Validator};
use serde_json::json;

fn name_with(args: serde_json::Value) -> serde_json::Value {
    json!({"users": {"select": {"name": {"args": args, "select": {"first": {}}}}}})
}

#[test]
fn declared_arguments_are_accepted() {
    assert_valid(&name_with(json!({"exampleArg1": [USER_ID]})));
    assert_valid(&json!({
        "users": {"select": {"birthDate": {"args": {"exampleArg2": null}}}}
    }));
}

#[test]
fn undeclared_argument_is_undefined() {
    let err = expect_error(
        &name_with(json!({"exampleArg9": 1})),
        ValidationErrorKind::UndefinedProperty,
    );
    assert_eq!(err.path(), "root.users.name.exampleArg9");
    assert_eq!(err.detail(), "undefined argument: 'exampleArg9'");
}

#[test]
fn arguments_on_a_property_without_any_are_undefined() {
    expect_error(
        &json!({"users": {"args": {"limit": 3}}}),
        ValidationErrorKind::UndefinedProperty,
    );
}

#[test]
fn malformed_identifier_is_mismatching() {
    let err = expect_error(
        &name_with(json!({"exampleArg1": [USER_ID, "not-an-id"]})),
        ValidationErrorKind::MismatchingTypes,
    );
    assert_eq!(err.path(), "root.users.name.exampleArg1.1");
    assert_eq!(err.detail(), "illegal value for ID<User>");
}

#[test]
fn list_argument_requires_an_array() {
    expect_error(
        &name_with(json!({"exampleArg1": USER_ID})),
        ValidationErrorKind::MismatchingTypes,
    );
}

#[test]
fn null_for_a_required_argument_is_mismatching() {
    expect_error(
        &name_with(json!({"exampleArg1": null})),
        ValidationErrorKind::MismatchingTypes,
    );
}

#[test]
fn time_argument_must_be_a_timestamp() {
    let err = expect_error(
        &json!({"users": {"select": {"birthDate": {"args": {"exampleArg2": "last tuesday"}}}}}),
        ValidationErrorKind::MismatchingTypes,
    );
    assert_eq!(err.path(), "root.users.birthDate.exampleArg2");
}

#[test]
fn args_must_be_an_object() {
    expect_error(
        &json!({"users": {"select": {"birthDate": {"args": ["exampleArg2"]}}}}),
        ValidationErrorKind::MismatchingTypes,
    );
}

#[test]
fn paging_values_are_checked() {
    expect_error(
        &json!({"users": {"listArgs": {"limit": 0}}}),
        ValidationErrorKind::MismatchingTypes,
    );
    expect_error(
        &json!({"users": {"listArgs": {"limit": 5, "after": "x"}}}),
        ValidationErrorKind::MismatchingTypes,
    );
    expect_error(
        &json!({"users": {"listArgs": {"ids": ["x"]}}}),
        ValidationErrorKind::MismatchingTypes,
    );
}

#[test]
fn literal_checks_can_be_disabled() {
    let schema = Schema::example();
    let validator = Validator::new(&schema).with_literal_checks(false);

    assert!(validator
        .validate(&json!({"users": {"listArgs": {"limit": 5, "after": "x"}}}))
        .is_ok());
    assert!(validator
        .validate(&name_with(json!({"exampleArg1": "whatever"})))
        .is_ok());

    // Argument names and paging structure are still enforced.
    let err = validator
        .validate(&name_with(json!({"exampleArg9": 1})))
        .unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::UndefinedProperty);
    let err = validator
        .validate(&json!({"users": {"listArgs": {"after": "x"}}}))
        .unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::MissingPageLimitArgument);
}

#[test]
fn enum_and_struct_arguments() {
    let schema = library_schema();
    assert_valid_with(
        &schema,
        &json!({
            "shelf": {"select": {
                "books": {
                    "args": {"minSize": {"height": 20, "width": 12}},
                    "listArgs": {"limit": 10},
                    "select": {"related": {"args": {"genre": "poetry"}, "listArgs": {"limit": 3}}}
                }
            }}
        }),
    );

    let err = expect_error_with(
        &schema,
        &json!({"shelf": {"select": {"books": {"args": {"minSize": {"depth": 3}}}}}}),
        ValidationErrorKind::UndefinedProperty,
    );
    assert_eq!(err.path(), "root.shelf.books.minSize.depth");

    let err = expect_error_with(
        &schema,
        &json!({"shelf": {"select": {"books": {"args": {"minSize": {"height": -1}}}}}}),
        ValidationErrorKind::MismatchingTypes,
    );
    assert_eq!(err.path(), "root.shelf.books.minSize.height");

    expect_error_with(
        &schema,
        &json!({"shelf": {"select": {"books": {"select": {"related": {"args": {"genre": "drama"}}}}}}}),
        ValidationErrorKind::MismatchingTypes,
    );
}

#[test]
fn identifier_argument_on_root_property() {
    let schema = library_schema();
    assert_valid_with(
        &schema,
        &json!({"book": {"args": {"id": USER_ID}, "select": {"title": {}, "isbn": {}}}}),
    );
    expect_error_with(
        &schema,
        &json!({"book": {"args": {"id": "978-3-16-148410-0"}}}),
        ValidationErrorKind::MismatchingTypes,
    );
}
