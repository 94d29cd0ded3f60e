//! Schema model for query validation.
//!
//! A [`Schema`] is an immutable arena of named types. Types refer to each
//! other through [`TypeId`] handles, so cyclic graphs such as
//! `User.friends: [User]` are declared in two passes with a
//! [`SchemaBuilder`]: first every type is declared and receives a handle,
//! then properties, union members, and enum variants are attached.
//!
//! # Example
//!
//! ```
//! use query_validator::schema::{PropertyDecl, Primitive, SchemaBuilder, TypeKind};
//!
//! let mut builder = SchemaBuilder::new();
//! let root = builder.root();
//! let text = builder.primitive(Primitive::Text);
//! let user = builder.declare("User", TypeKind::Entity);
//! builder.define(user, |t| {
//!     t.add_property("nick", PropertyDecl::new(text))
//!         .add_property("friends", PropertyDecl::new(user).list())
//! });
//! builder.define(root, |t| t.add_property("users", PropertyDecl::new(user).list()));
//!
//! let schema = builder.build().unwrap();
//! assert!(schema.lookup_root_property("users").unwrap().is_list());
//! assert!(schema.is_known_type("User"));
//! ```

pub mod attributes;
mod builder;
mod fixtures;

pub use attributes::{Attribute, AttributeSet};
pub use builder::{SchemaBuilder, SchemaError, TypeBuilder};
pub use fixtures::is_entity_identifier;

use smol_str::SmolStr;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Handle to a type inside one [`Schema`] (or the builder producing it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the type in its schema's arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of a schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Root,
    Primitive,
    Scalar,
    Enum,
    Struct,
    Entity,
    EntityId,
    Union,
    Trait,
}

impl TypeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Primitive => "primitive",
            Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::Struct => "struct",
            Self::Entity => "entity",
            Self::EntityId => "entity-id",
            Self::Union => "union",
            Self::Trait => "trait",
        }
    }

    /// Whether types of this kind may declare properties.
    pub fn owns_properties(self) -> bool {
        matches!(self, Self::Root | Self::Struct | Self::Entity)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Built-in leaf value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Float64,
    Uint32,
    Int32,
    String,
    Text,
    /// RFC 3339 timestamp.
    Time,
}

impl Primitive {
    pub const ALL: [Self; 7] = [
        Self::Bool,
        Self::Float64,
        Self::Uint32,
        Self::Int32,
        Self::String,
        Self::Text,
        Self::Time,
    ];

    /// Canonical schema name of the primitive.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Float64 => "Float64",
            Self::Uint32 => "Uint32",
            Self::Int32 => "Int32",
            Self::String => "String",
            Self::Text => "Text",
            Self::Time => "Time",
        }
    }
}

/// Pluggable predicate deciding whether a literal is a valid identifier.
#[derive(Clone)]
pub struct IdentifierRule(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl IdentifierRule {
    pub fn new(rule: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(rule))
    }

    pub fn accepts(&self, literal: &str) -> bool {
        (self.0)(literal)
    }
}

impl fmt::Debug for IdentifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentifierRule(..)")
    }
}

/// Identifier declaration carried by entity-id types.
#[derive(Debug, Clone)]
pub struct Identifier {
    target: TypeId,
    rule: IdentifierRule,
}

impl Identifier {
    /// The entity this identifier addresses.
    pub fn target(&self) -> TypeId {
        self.target
    }

    pub fn accepts(&self, literal: &str) -> bool {
        self.rule.accepts(literal)
    }
}

/// Declaration of a single property argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentDecl {
    ty: TypeId,
    optional: bool,
    list: bool,
}

impl ArgumentDecl {
    pub fn new(ty: TypeId) -> Self {
        Self {
            ty,
            optional: false,
            list: false,
        }
    }

    /// Marks the argument optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the argument as taking a list of values.
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn ty(&self) -> TypeId {
        self.ty
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_list(&self) -> bool {
        self.list
    }
}

/// Declaration of a property on a root, struct, or entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    target: TypeId,
    list: bool,
    optional: bool,
    args: BTreeMap<SmolStr, ArgumentDecl>,
    /// Filled in by [`SchemaBuilder::build`] once every target is defined.
    applicable: AttributeSet,
}

impl PropertyDecl {
    pub fn new(target: TypeId) -> Self {
        Self {
            target,
            list: false,
            optional: false,
            args: BTreeMap::new(),
            applicable: AttributeSet::EMPTY,
        }
    }

    /// Marks the property as yielding a sequence of values.
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    /// Marks the property optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Adds an argument declaration.
    pub fn with_argument(mut self, name: impl Into<SmolStr>, arg: ArgumentDecl) -> Self {
        self.args.insert(name.into(), arg);
        self
    }

    pub fn target(&self) -> TypeId {
        self.target
    }

    pub fn is_list(&self) -> bool {
        self.list
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn args(&self) -> &BTreeMap<SmolStr, ArgumentDecl> {
        &self.args
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDecl> {
        self.args.get(name)
    }

    /// Query node attributes this property accepts.
    pub fn applicable(&self) -> AttributeSet {
        self.applicable
    }
}

/// A named schema type.
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: SmolStr,
    kind: TypeKind,
    primitive: Option<Primitive>,
    properties: BTreeMap<SmolStr, PropertyDecl>,
    members: Vec<TypeId>,
    variants: Vec<SmolStr>,
    identifier: Option<Identifier>,
    /// Attributes accepted when this type is selected as a union branch.
    branch: AttributeSet,
}

impl TypeDef {
    fn new(name: SmolStr, kind: TypeKind) -> Self {
        Self {
            name,
            kind,
            primitive: None,
            properties: BTreeMap::new(),
            members: Vec::new(),
            variants: Vec::new(),
            identifier: None,
            branch: AttributeSet::EMPTY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn primitive(&self) -> Option<Primitive> {
        self.primitive
    }

    pub fn properties(&self) -> &BTreeMap<SmolStr, PropertyDecl> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.get(name)
    }

    /// Member types of a union, in declaration order.
    pub fn members(&self) -> &[TypeId] {
        &self.members
    }

    /// Variant names of an enum.
    pub fn variants(&self) -> &[SmolStr] {
        &self.variants
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// Checks a literal against this type's identifier predicate.
    ///
    /// Types that are not entity identifiers accept nothing.
    pub fn validate(&self, literal: &str) -> bool {
        self.identifier
            .as_ref()
            .is_some_and(|identifier| identifier.accepts(literal))
    }

    /// Whether queries can select sub-properties of this type.
    pub fn is_selectable(&self) -> bool {
        !self.properties.is_empty()
    }

    pub fn is_union(&self) -> bool {
        !self.members.is_empty()
    }

    pub fn branch_attributes(&self) -> AttributeSet {
        self.branch
    }
}

/// Immutable table of named types.
///
/// `TypeId`s handed out by the builder that produced this schema are always
/// valid for it; handles from another schema are not.
#[derive(Debug, Clone)]
pub struct Schema {
    types: Vec<TypeDef>,
    by_name: HashMap<SmolStr, TypeId>,
    root: TypeId,
    /// Entity type -> its entity-id type.
    identifiers: HashMap<TypeId, TypeId>,
}

impl Schema {
    /// Returns the type behind `id`.
    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }

    pub fn root(&self) -> &TypeDef {
        self.get(self.root)
    }

    pub fn root_id(&self) -> TypeId {
        self.root
    }

    /// Looks up a top-level property.
    pub fn lookup_root_property(&self, name: &str) -> Option<&PropertyDecl> {
        self.root().property(name)
    }

    pub fn lookup_type(&self, name: &str) -> Option<&TypeDef> {
        self.type_id(name).map(|id| self.get(id))
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn is_known_type(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The entity-id type addressing `entity`, if one is declared.
    pub fn identifier_for(&self, entity: TypeId) -> Option<&TypeDef> {
        self.identifiers.get(&entity).map(|id| self.get(*id))
    }

    /// Finds the member of `union` named `name`.
    pub fn union_member(&self, union: &TypeDef, name: &str) -> Option<TypeId> {
        union
            .members()
            .iter()
            .copied()
            .find(|member| self.get(*member).name() == name)
    }

    /// Iterates over all types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, def)| (TypeId::new(index), def))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
