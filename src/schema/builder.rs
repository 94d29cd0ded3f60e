//! Two-pass schema construction.
//!
//! Types are declared first, each receiving a [`TypeId`]; their contents are
//! attached afterwards with [`SchemaBuilder::define`]. Problems found along
//! the way are recorded and reported by [`SchemaBuilder::build`].

use miette::Diagnostic;
use smol_str::SmolStr;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use super::{
    AttributeSet, Identifier, IdentifierRule, Primitive, PropertyDecl, Schema, TypeDef, TypeId,
    TypeKind,
};

/// Name of the root type created by every builder.
pub const ROOT_TYPE_NAME: &str = "root";

/// Inconsistent schema declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SchemaError {
    #[error("type '{name}' is declared more than once")]
    #[diagnostic(code(schema::duplicate_type))]
    DuplicateType { name: SmolStr },

    #[error("type '{ty}' declares property '{property}' more than once")]
    #[diagnostic(code(schema::duplicate_property))]
    DuplicateProperty { ty: SmolStr, property: SmolStr },

    #[error("type handle #{index} does not belong to this schema")]
    #[diagnostic(code(schema::unknown_handle))]
    UnknownHandle { index: usize },

    #[error("{kind} type '{ty}' cannot declare properties")]
    #[diagnostic(
        code(schema::misplaced_properties),
        help("only root, struct, and entity types own properties")
    )]
    MisplacedProperties { ty: SmolStr, kind: TypeKind },

    #[error("{kind} type '{ty}' cannot declare union members")]
    #[diagnostic(code(schema::misplaced_members))]
    MisplacedMembers { ty: SmolStr, kind: TypeKind },

    #[error("{kind} type '{ty}' cannot declare enum variants")]
    #[diagnostic(code(schema::misplaced_variants))]
    MisplacedVariants { ty: SmolStr, kind: TypeKind },

    #[error("union '{ty}' has no member types")]
    #[diagnostic(code(schema::empty_union))]
    EmptyUnion { ty: SmolStr },

    #[error("only one root type may be declared, found '{ty}'")]
    #[diagnostic(code(schema::second_root))]
    SecondRoot { ty: SmolStr },

    #[error("identifier '{ty}' targets '{target}', which is not an entity")]
    #[diagnostic(code(schema::invalid_identifier_target))]
    InvalidIdentifierTarget { ty: SmolStr, target: SmolStr },

    #[error("entity '{entity}' has more than one identifier type")]
    #[diagnostic(code(schema::duplicate_identifier))]
    DuplicateIdentifier { entity: SmolStr },

    #[error("{kind} type '{ty}' must be declared through its dedicated constructor")]
    #[diagnostic(
        code(schema::bare_declaration),
        help("use `SchemaBuilder::primitive` or `SchemaBuilder::entity_id`")
    )]
    BareDeclaration { ty: SmolStr, kind: TypeKind },
}

/// Contents attached to a declared type.
#[derive(Debug, Default)]
pub struct TypeBuilder {
    properties: Vec<(SmolStr, PropertyDecl)>,
    members: Vec<TypeId>,
    variants: Vec<SmolStr>,
}

impl TypeBuilder {
    /// Adds a property.
    pub fn add_property(mut self, name: impl Into<SmolStr>, property: PropertyDecl) -> Self {
        self.properties.push((name.into(), property));
        self
    }

    /// Adds a union member.
    pub fn add_member(mut self, member: TypeId) -> Self {
        self.members.push(member);
        self
    }

    /// Adds an enum variant.
    pub fn add_variant(mut self, variant: impl Into<SmolStr>) -> Self {
        self.variants.push(variant.into());
        self
    }
}

/// Builder for a [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    types: Vec<TypeDef>,
    by_name: HashMap<SmolStr, TypeId>,
    root: TypeId,
    problems: Vec<SchemaError>,
}

impl SchemaBuilder {
    /// Creates a builder holding only the root type.
    pub fn new() -> Self {
        let mut builder = Self {
            types: Vec::new(),
            by_name: HashMap::new(),
            root: TypeId::new(0),
            problems: Vec::new(),
        };
        builder.root = builder.insert(TypeDef::new(ROOT_TYPE_NAME.into(), TypeKind::Root));
        builder
    }

    pub fn root(&self) -> TypeId {
        self.root
    }

    /// Declares a type and returns its handle.
    ///
    /// Primitives and entity identifiers carry extra data and are declared
    /// with [`primitive`](Self::primitive) and [`entity_id`](Self::entity_id).
    pub fn declare(&mut self, name: impl Into<SmolStr>, kind: TypeKind) -> TypeId {
        let name = name.into();
        match kind {
            TypeKind::Root => self.problems.push(SchemaError::SecondRoot { ty: name.clone() }),
            TypeKind::Primitive | TypeKind::EntityId => self
                .problems
                .push(SchemaError::BareDeclaration {
                    ty: name.clone(),
                    kind,
                }),
            _ => {}
        }
        self.insert(TypeDef::new(name, kind))
    }

    /// Declares a built-in primitive under its canonical name.
    pub fn primitive(&mut self, primitive: Primitive) -> TypeId {
        let mut def = TypeDef::new(primitive.name().into(), TypeKind::Primitive);
        def.primitive = Some(primitive);
        self.insert(def)
    }

    /// Declares the identifier type of `target`, validated by `rule`.
    pub fn entity_id(
        &mut self,
        name: impl Into<SmolStr>,
        target: TypeId,
        rule: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> TypeId {
        let mut def = TypeDef::new(name.into(), TypeKind::EntityId);
        def.identifier = Some(Identifier {
            target,
            rule: IdentifierRule::new(rule),
        });
        self.insert(def)
    }

    /// Attaches properties, members, or variants to a declared type.
    pub fn define<F>(&mut self, id: TypeId, build: F) -> &mut Self
    where
        F: FnOnce(TypeBuilder) -> TypeBuilder,
    {
        let contents = build(TypeBuilder::default());
        let Some(def) = self.types.get_mut(id.index()) else {
            self.problems.push(SchemaError::UnknownHandle { index: id.index() });
            return self;
        };

        if !contents.properties.is_empty() && !def.kind.owns_properties() {
            self.problems.push(SchemaError::MisplacedProperties {
                ty: def.name.clone(),
                kind: def.kind,
            });
        }
        if !contents.members.is_empty() && def.kind != TypeKind::Union {
            self.problems.push(SchemaError::MisplacedMembers {
                ty: def.name.clone(),
                kind: def.kind,
            });
        }
        if !contents.variants.is_empty() && def.kind != TypeKind::Enum {
            self.problems.push(SchemaError::MisplacedVariants {
                ty: def.name.clone(),
                kind: def.kind,
            });
        }

        for (name, property) in contents.properties {
            if def.properties.contains_key(&name) {
                self.problems.push(SchemaError::DuplicateProperty {
                    ty: def.name.clone(),
                    property: name,
                });
                continue;
            }
            def.properties.insert(name, property);
        }
        def.members.extend(contents.members);
        def.variants.extend(contents.variants);
        self
    }

    /// Checks cross-references and freezes the schema.
    pub fn build(mut self) -> Result<Schema, SchemaError> {
        if let Some(problem) = self.problems.drain(..).next() {
            return Err(problem);
        }
        self.check_references()?;
        let identifiers = self.link_identifiers()?;
        self.compute_attribute_sets();

        Ok(Schema {
            types: self.types,
            by_name: self.by_name,
            root: self.root,
            identifiers,
        })
    }

    fn insert(&mut self, def: TypeDef) -> TypeId {
        if self.by_name.contains_key(&def.name) {
            self.problems
                .push(SchemaError::DuplicateType { name: def.name.clone() });
        }
        let id = TypeId::new(self.types.len());
        self.by_name.entry(def.name.clone()).or_insert(id);
        self.types.push(def);
        id
    }

    fn check_handle(&self, id: TypeId) -> Result<(), SchemaError> {
        if id.index() < self.types.len() {
            Ok(())
        } else {
            Err(SchemaError::UnknownHandle { index: id.index() })
        }
    }

    fn check_references(&self) -> Result<(), SchemaError> {
        for def in &self.types {
            for property in def.properties.values() {
                self.check_handle(property.target)?;
                for arg in property.args.values() {
                    self.check_handle(arg.ty())?;
                }
            }
            for member in &def.members {
                self.check_handle(*member)?;
            }
            if let Some(identifier) = &def.identifier {
                self.check_handle(identifier.target)?;
            }
            if def.kind == TypeKind::Union && def.members.is_empty() {
                return Err(SchemaError::EmptyUnion {
                    ty: def.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn link_identifiers(&self) -> Result<HashMap<TypeId, TypeId>, SchemaError> {
        let mut identifiers = HashMap::new();
        for (index, def) in self.types.iter().enumerate() {
            let Some(identifier) = &def.identifier else {
                continue;
            };
            let target = &self.types[identifier.target.index()];
            if target.kind != TypeKind::Entity {
                return Err(SchemaError::InvalidIdentifierTarget {
                    ty: def.name.clone(),
                    target: target.name.clone(),
                });
            }
            if identifiers
                .insert(identifier.target, TypeId::new(index))
                .is_some()
            {
                return Err(SchemaError::DuplicateIdentifier {
                    entity: target.name.clone(),
                });
            }
        }
        Ok(identifiers)
    }

    fn compute_attribute_sets(&mut self) {
        let branch_sets: Vec<AttributeSet> = self.types.iter().map(AttributeSet::for_branch).collect();

        let property_sets: Vec<BTreeMap<SmolStr, AttributeSet>> = self
            .types
            .iter()
            .map(|def| {
                def.properties
                    .iter()
                    .map(|(name, property)| {
                        let target = &self.types[property.target.index()];
                        (name.clone(), AttributeSet::for_property(property.list, target))
                    })
                    .collect()
            })
            .collect();

        for ((def, branch), sets) in self.types.iter_mut().zip(branch_sets).zip(property_sets) {
            def.branch = branch;
            for (name, set) in sets {
                if let Some(property) = def.properties.get_mut(&name) {
                    property.applicable = set;
                }
            }
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
