//! Common test utilities
//!
//! Shared helpers for validating documents and asserting on the resulting
//! errors.

#![allow(dead_code)]

use query_validator::{
    ArgumentDecl, Primitive, PropertyDecl, Schema, SchemaBuilder, TypeKind, ValidationError,
    ValidationErrorKind, Validator, schema::is_entity_identifier,
};
use serde_json::Value;

/// A valid identifier for the example schema's `ID<User>`.
pub const USER_ID: &str = "0123456789abcdef0123456789abcdef";
pub const OTHER_USER_ID: &str = "fedcba9876543210FEDCBA9876543210";

/// Format an error for display in assertion messages.
pub fn format_error(err: &ValidationError) -> String {
    format!("{} [{}]", err, err.kind())
}

/// Assert that `document` validates against `schema`.
pub fn assert_valid_with(schema: &Schema, document: &Value) {
    if let Err(err) = Validator::new(schema).validate(document) {
        panic!(
            "unexpected validation error for {document}:\n{}",
            format_error(&err)
        );
    }
}

/// Assert that `document` validates against the example schema.
pub fn assert_valid(document: &Value) {
    assert_valid_with(&Schema::example(), document);
}

/// Validate against `schema`, expecting an error of `kind`.
pub fn expect_error_with(
    schema: &Schema,
    document: &Value,
    kind: ValidationErrorKind,
) -> ValidationError {
    match Validator::new(schema).validate(document) {
        Ok(()) => panic!("expected {kind} for {document}, but validation succeeded"),
        Err(err) => {
            assert_eq!(
                err.kind(),
                kind,
                "wrong error kind for {document}: {}",
                format_error(&err)
            );
            err
        }
    }
}

/// Validate against the example schema, expecting an error of `kind`.
pub fn expect_error(document: &Value, kind: ValidationErrorKind) -> ValidationError {
    expect_error_with(&Schema::example(), document, kind)
}

/// A library schema where `book` is a single (non-list) root property and
/// `Shelf` nests structs two levels deep.
pub fn library_schema() -> Schema {
    let mut builder = SchemaBuilder::new();
    let root = builder.root();
    let text = builder.primitive(Primitive::Text);
    let count = builder.primitive(Primitive::Uint32);
    let genre = builder.declare("Genre", TypeKind::Enum);
    let isbn = builder.declare("Isbn", TypeKind::Scalar);
    let dimensions = builder.declare("Dimensions", TypeKind::Struct);
    let book = builder.declare("Book", TypeKind::Entity);
    let book_id = builder.entity_id("ID<Book>", book, is_entity_identifier);
    let shelf = builder.declare("Shelf", TypeKind::Struct);

    builder
        .define(genre, |t| t.add_variant("fiction").add_variant("poetry"))
        .define(dimensions, |t| {
            t.add_property("height", PropertyDecl::new(count))
                .add_property("width", PropertyDecl::new(count))
        })
        .define(book, |t| {
            t.add_property("title", PropertyDecl::new(text))
                .add_property("isbn", PropertyDecl::new(isbn))
                .add_property(
                    "related",
                    PropertyDecl::new(book)
                        .list()
                        .with_argument("genre", ArgumentDecl::new(genre).optional()),
                )
        })
        .define(shelf, |t| {
            t.add_property("label", PropertyDecl::new(text))
                .add_property("size", PropertyDecl::new(dimensions))
                .add_property(
                    "books",
                    PropertyDecl::new(book)
                        .list()
                        .with_argument("minSize", ArgumentDecl::new(dimensions).optional()),
                )
        })
        .define(root, |t| {
            t.add_property(
                "book",
                PropertyDecl::new(book).with_argument("id", ArgumentDecl::new(book_id)),
            )
            .add_property("shelf", PropertyDecl::new(shelf))
        });

    builder.build().expect("library schema is well formed")
}
