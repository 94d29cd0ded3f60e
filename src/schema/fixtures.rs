//! The user-graph example schema.

use super::{ArgumentDecl, Primitive, PropertyDecl, Schema, SchemaBuilder, TypeKind};

/// Returns true if `literal` has the shape of an entity identifier:
/// exactly 32 hexadecimal digits.
pub fn is_entity_identifier(literal: &str) -> bool {
    literal.len() == 32 && literal.bytes().all(|b| b.is_ascii_hexdigit())
}

impl Schema {
    /// A small social graph: users with names, friends, an optional partner
    /// that is either a user or a string, and a birth date.
    ///
    /// ```text
    /// root           { users: [User] }
    /// PersonName     { first: Text, last: Text }
    /// User           { name(exampleArg1: [ID<User>]): PersonName,
    ///                  friends: [User],
    ///                  partner: UserOrString?,
    ///                  birthDate(exampleArg2: Time?): Time }
    /// ID<User>       32 hex digits
    /// UserOrString = User | String
    /// ```
    pub fn example() -> Self {
        let mut builder = SchemaBuilder::new();
        let root = builder.root();

        for primitive in [
            Primitive::Bool,
            Primitive::Float64,
            Primitive::Uint32,
            Primitive::Int32,
        ] {
            builder.primitive(primitive);
        }
        let string = builder.primitive(Primitive::String);
        let text = builder.primitive(Primitive::Text);
        let time = builder.primitive(Primitive::Time);

        let person_name = builder.declare("PersonName", TypeKind::Struct);
        let user = builder.declare("User", TypeKind::Entity);
        let user_id = builder.entity_id("ID<User>", user, is_entity_identifier);
        let user_or_string = builder.declare("UserOrString", TypeKind::Union);

        builder
            .define(root, |t| t.add_property("users", PropertyDecl::new(user).list()))
            .define(person_name, |t| {
                t.add_property("first", PropertyDecl::new(text))
                    .add_property("last", PropertyDecl::new(text))
            })
            .define(user, |t| {
                t.add_property(
                    "name",
                    PropertyDecl::new(person_name)
                        .with_argument("exampleArg1", ArgumentDecl::new(user_id).list()),
                )
                .add_property("friends", PropertyDecl::new(user).list())
                .add_property("partner", PropertyDecl::new(user_or_string).optional())
                .add_property(
                    "birthDate",
                    PropertyDecl::new(time)
                        .with_argument("exampleArg2", ArgumentDecl::new(time).optional()),
                )
            })
            .define(user_or_string, |t| t.add_member(user).add_member(string));

        match builder.build() {
            Ok(schema) => schema,
            Err(err) => unreachable!("example schema is well formed: {err}"),
        }
    }
}
