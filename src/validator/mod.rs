//! Query document validation.
//!
//! The [`Validator`] walks a query document in lock-step with a [`Schema`].
//! Each property node is checked for attributes its declaration does not
//! allow, for paging argument integrity, for argument names and values, for
//! accepted union members, and for its sub-selection, recursing into every
//! selected property and accepted branch. The first violation aborts the
//! walk.
//!
//! # Example
//!
//! ```
//! use query_validator::{Schema, ValidationErrorKind, Validator};
//! use serde_json::json;
//!
//! let schema = Schema::example();
//! let validator = Validator::new(&schema);
//!
//! let ok = json!({"users": {"listArgs": {"limit": 10}, "select": {"birthDate": {}}}});
//! assert!(validator.validate(&ok).is_ok());
//!
//! let bad = json!({"users": {"select": {"nickname": {}}}});
//! let err = validator.validate(&bad).unwrap_err();
//! assert_eq!(err.kind(), ValidationErrorKind::UndefinedProperty);
//! assert_eq!(err.path(), "root.users.nickname");
//! ```

mod context;
mod list_args;
mod literals;

pub use context::{PathContext, ROOT_TOKEN};
pub use list_args::LIST_ARGUMENTS;

use miette::{IntoDiagnostic, WrapErr};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::diag::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::lexer::parse_aliased;
use crate::schema::{Attribute, AttributeSet, PropertyDecl, Schema, TypeDef};

/// Configuration for query validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Check argument and paging values against their declared types.
    pub check_literals: bool,

    /// Accept `property = @alias` keys at the top level.
    pub allow_aliases: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_literals: true,
            allow_aliases: true,
        }
    }
}

/// Validates query documents against one schema.
///
/// A validator holds no per-call state; one instance can check any number of
/// documents, from any number of threads.
#[derive(Debug, Clone)]
pub struct Validator<'s> {
    schema: &'s Schema,
    config: ValidationConfig,
}

impl<'s> Validator<'s> {
    /// Creates a validator with default configuration.
    pub fn new(schema: &'s Schema) -> Self {
        Self::with_config(schema, ValidationConfig::default())
    }

    pub fn with_config(schema: &'s Schema, config: ValidationConfig) -> Self {
        Self { schema, config }
    }

    /// Enables or disables literal value checks.
    pub fn with_literal_checks(mut self, enabled: bool) -> Self {
        self.config.check_literals = enabled;
        self
    }

    /// Enables or disables aliased top-level keys.
    pub fn with_aliases(mut self, enabled: bool) -> Self {
        self.config.allow_aliases = enabled;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Validates a query document.
    ///
    /// Top-level keys are visited in document order. Each key is either a
    /// root property name or an aliased `property = @alias` form.
    pub fn validate(&self, document: &Value) -> ValidationResult {
        let _span = tracing::debug_span!("validate_query").entered();
        let result = self.validate_document(document);
        if let Err(err) = &result {
            tracing::debug!(kind = %err.kind(), path = err.path(), "query rejected");
        }
        result
    }

    /// Parses JSON text and validates it as a query document.
    pub fn validate_str(&self, source: &str) -> miette::Result<()> {
        let document: Value = serde_json::from_str(source)
            .into_diagnostic()
            .wrap_err("query document is not valid JSON")?;
        self.validate(&document)?;
        Ok(())
    }

    fn validate_document(&self, document: &Value) -> ValidationResult {
        let ctx = PathContext::root();
        let query = as_object(&ctx, document, "query document")?;

        for (key, node) in query {
            if let Some(decl) = self.schema.lookup_root_property(key) {
                self.evaluate_property(&ctx, decl, node, key, None)?;
                continue;
            }

            let selector = if self.config.allow_aliases {
                parse_aliased(key)
            } else {
                None
            };
            let Some(selector) = selector else {
                return Err(ValidationError::new(
                    ValidationErrorKind::InvalidPropertySelector,
                    &ctx.extend(key.as_str()),
                    format!("invalid property name: '{key}'"),
                ));
            };
            let Some(decl) = self.schema.lookup_root_property(selector.property) else {
                return Err(ValidationError::new(
                    ValidationErrorKind::UndefinedProperty,
                    &ctx.extend(selector.property),
                    format!("undefined property: '{key}'"),
                ));
            };
            self.evaluate_property(&ctx, decl, node, selector.property, Some(selector.alias))?;
        }
        Ok(())
    }

    /// Checks one property node and everything beneath it.
    fn evaluate_property(
        &self,
        ctx: &PathContext<'_>,
        decl: &PropertyDecl,
        node: &Value,
        name: &str,
        alias: Option<&str>,
    ) -> ValidationResult {
        let ctx = ctx.extend(name);
        tracing::trace!(path = %ctx, alias, "evaluating property");

        let node = as_object(&ctx, node, "query node")?;
        check_attributes(&ctx, decl.applicable(), node)?;

        let target = self.schema.get(decl.target());

        if let Some(list_args) = node.get(Attribute::ListArgs.key()) {
            let list_args = as_object(&ctx, list_args, "list arguments")?;
            list_args::check_integrity(&ctx, list_args)?;
            if self.config.check_literals {
                let element_id = self.schema.identifier_for(decl.target());
                list_args::check_values(&ctx, self.schema, target, element_id, list_args)?;
            }
        }

        if let Some(args) = node.get(Attribute::Args.key()) {
            self.check_arguments(&ctx, decl, args)?;
        }

        self.evaluate_shape(&ctx, target, node)
    }

    /// Checks the `accept` and `select` attributes of a node of type `target`.
    fn evaluate_shape(
        &self,
        ctx: &PathContext<'_>,
        target: &TypeDef,
        node: &Map<String, Value>,
    ) -> ValidationResult {
        if let Some(accept) = node.get(Attribute::Accept.key()) {
            self.evaluate_accept(ctx, target, accept)?;
        }
        if let Some(select) = node.get(Attribute::Select.key()) {
            self.evaluate_selection(ctx, target, select)?;
        }
        Ok(())
    }

    fn check_arguments(
        &self,
        ctx: &PathContext<'_>,
        decl: &PropertyDecl,
        args: &Value,
    ) -> ValidationResult {
        let args = as_object(ctx, args, "arguments")?;
        for (name, value) in args {
            let ctx = ctx.extend(name.as_str());
            let Some(arg) = decl.argument(name) else {
                return Err(ValidationError::new(
                    ValidationErrorKind::UndefinedProperty,
                    &ctx,
                    format!("undefined argument: '{name}'"),
                ));
            };
            if self.config.check_literals {
                literals::check_argument(&ctx, self.schema, arg, value)?;
            }
        }
        Ok(())
    }

    /// Checks accepted union members, then descends into each branch.
    fn evaluate_accept(
        &self,
        ctx: &PathContext<'_>,
        union: &TypeDef,
        accept: &Value,
    ) -> ValidationResult {
        let accept = as_object(ctx, accept, "accepted types")?;
        if accept.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingSelector,
                ctx,
                "empty type acceptance",
            ));
        }

        let mut branches = Vec::with_capacity(accept.len());
        for (type_name, branch) in accept {
            let Some(member) = self.schema.union_member(union, type_name) else {
                return Err(ValidationError::new(
                    ValidationErrorKind::UndefinedType,
                    &ctx.extend(type_name.as_str()),
                    format!("undefined type: {type_name}"),
                ));
            };
            branches.push((type_name, self.schema.get(member), branch));
        }

        for (type_name, member, branch) in branches {
            let ctx = ctx.extend(type_name.as_str());
            let node = as_object(&ctx, branch, "accepted type selection")?;
            check_attributes(&ctx, member.branch_attributes(), node)?;
            self.evaluate_shape(&ctx, member, node)?;
        }
        Ok(())
    }

    /// Checks that a selection is non-empty and fully declared, then
    /// evaluates every selected property.
    fn evaluate_selection(
        &self,
        ctx: &PathContext<'_>,
        target: &TypeDef,
        select: &Value,
    ) -> ValidationResult {
        let select = as_object(ctx, select, "selection")?;
        if select.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingSelector,
                ctx,
                "empty selector",
            ));
        }

        let mut selected = Vec::with_capacity(select.len());
        for (name, child) in select {
            let Some(decl) = target.property(name) else {
                return Err(ValidationError::new(
                    ValidationErrorKind::UndefinedProperty,
                    &ctx.extend(name.as_str()),
                    format!("unexpected selection: {name}"),
                ));
            };
            selected.push((name, decl, child));
        }

        for (name, decl, child) in selected {
            self.evaluate_property(ctx, decl, child, name, None)?;
        }
        Ok(())
    }
}

/// Rejects any node attribute outside `applicable`.
fn check_attributes(
    ctx: &PathContext<'_>,
    applicable: AttributeSet,
    node: &Map<String, Value>,
) -> ValidationResult {
    for key in node.keys() {
        let allowed = Attribute::from_key(key).is_some_and(|attr| applicable.contains(attr));
        if !allowed {
            return Err(ValidationError::new(
                ValidationErrorKind::UnexpectedAttribute,
                &ctx.extend(key.as_str()),
                format!("unexpected attribute {key}"),
            ));
        }
    }
    Ok(())
}

fn as_object<'v>(
    ctx: &PathContext<'_>,
    value: &'v Value,
    what: &str,
) -> ValidationResult<&'v Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        ValidationError::new(
            ValidationErrorKind::MismatchingTypes,
            ctx,
            format!("expected an object for the {what}, got {}", json_kind(value)),
        )
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
