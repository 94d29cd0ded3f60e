//! Literal value checks for property arguments and paging cursors.

use chrono::DateTime;
use serde_json::Value;

use super::PathContext;
use crate::diag::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::schema::{ArgumentDecl, Primitive, Schema, TypeDef, TypeKind};

/// Checks an argument value against its declaration.
pub(crate) fn check_argument(
    ctx: &PathContext<'_>,
    schema: &Schema,
    decl: &ArgumentDecl,
    value: &Value,
) -> ValidationResult {
    let ty = schema.get(decl.ty());
    if value.is_null() {
        return if decl.is_optional() {
            Ok(())
        } else {
            Err(mismatch(ctx, format!("null given for required {}", ty.name())))
        };
    }
    if !decl.is_list() {
        return check_literal(ctx, schema, ty, value);
    }

    let Some(items) = value.as_array() else {
        return Err(mismatch(ctx, format!("expected a list of {}, got {value}", ty.name())));
    };
    for (index, item) in items.iter().enumerate() {
        check_literal(&ctx.extend(index.to_string()), schema, ty, item)?;
    }
    Ok(())
}

/// Checks a single literal against `ty`.
pub(crate) fn check_literal(
    ctx: &PathContext<'_>,
    schema: &Schema,
    ty: &TypeDef,
    value: &Value,
) -> ValidationResult {
    let fits = match ty.kind() {
        TypeKind::Primitive => ty
            .primitive()
            .is_some_and(|primitive| fits_primitive(primitive, value)),
        TypeKind::Scalar => !(value.is_object() || value.is_array() || value.is_null()),
        TypeKind::Enum => value
            .as_str()
            .is_some_and(|variant| ty.variants().iter().any(|v| v == variant)),
        TypeKind::EntityId => return check_identifier(ctx, ty, value),
        TypeKind::Struct => return check_struct(ctx, schema, ty, value),
        TypeKind::Union => ty
            .members()
            .iter()
            .any(|member| check_literal(ctx, schema, schema.get(*member), value).is_ok()),
        TypeKind::Entity | TypeKind::Root | TypeKind::Trait => {
            return Err(mismatch(
                ctx,
                format!("{} {} cannot be given as a literal", ty.kind(), ty.name()),
            ));
        }
    };

    if fits {
        Ok(())
    } else {
        Err(mismatch(ctx, format!("illegal value for {}: {value}", ty.name())))
    }
}

/// Checks an identifier literal against an entity-id type's predicate.
pub(crate) fn check_identifier(
    ctx: &PathContext<'_>,
    id_type: &TypeDef,
    value: &Value,
) -> ValidationResult {
    match value.as_str() {
        Some(literal) if id_type.validate(literal) => Ok(()),
        _ => Err(mismatch(ctx, format!("illegal value for {}", id_type.name()))),
    }
}

fn check_struct(
    ctx: &PathContext<'_>,
    schema: &Schema,
    ty: &TypeDef,
    value: &Value,
) -> ValidationResult {
    let Some(fields) = value.as_object() else {
        return Err(mismatch(ctx, format!("expected {} object, got {value}", ty.name())));
    };
    for (name, field) in fields {
        let ctx = ctx.extend(name.as_str());
        let Some(property) = ty.property(name) else {
            return Err(ValidationError::new(
                ValidationErrorKind::UndefinedProperty,
                &ctx,
                format!("undefined field '{name}' on {}", ty.name()),
            ));
        };
        let mut decl = ArgumentDecl::new(property.target()).optional();
        if property.is_list() {
            decl = decl.list();
        }
        check_argument(&ctx, schema, &decl, field)?;
    }
    Ok(())
}

fn fits_primitive(primitive: Primitive, value: &Value) -> bool {
    match primitive {
        Primitive::Bool => value.is_boolean(),
        Primitive::Float64 => value.is_number(),
        Primitive::Int32 => value
            .as_i64()
            .is_some_and(|n| i32::try_from(n).is_ok()),
        Primitive::Uint32 => value
            .as_u64()
            .is_some_and(|n| u32::try_from(n).is_ok()),
        Primitive::String | Primitive::Text => value.is_string(),
        Primitive::Time => value
            .as_str()
            .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
    }
}

fn mismatch(ctx: &PathContext<'_>, detail: String) -> ValidationError {
    ValidationError::new(ValidationErrorKind::MismatchingTypes, ctx, detail)
}
