//! Paging argument checks for list properties.
//!
//! A list property is paged either by explicit identifiers (`ids`) or by a
//! page size (`limit`) with an optional cursor (`after`). The two modes do
//! not mix.

use serde_json::{Map, Value};

use super::PathContext;
use super::literals::check_identifier;
use crate::diag::{ValidationError, ValidationErrorKind, ValidationResult};
use crate::schema::{Schema, TypeDef};

pub const IDS: &str = "ids";
pub const AFTER: &str = "after";
pub const LIMIT: &str = "limit";

/// Recognized paging arguments.
pub const LIST_ARGUMENTS: [&str; 3] = [IDS, AFTER, LIMIT];

/// Checks the structure of `listArgs`: known keys only, at least one
/// selector, and no mixing of `ids` with `after`/`limit`.
pub(crate) fn check_integrity(
    ctx: &PathContext<'_>,
    list_args: &Map<String, Value>,
) -> ValidationResult {
    if let Some(unknown) = list_args
        .keys()
        .find(|key| !LIST_ARGUMENTS.contains(&key.as_str()))
    {
        return Err(ValidationError::new(
            ValidationErrorKind::UnknownListArgument,
            &ctx.extend(unknown.as_str()),
            format!("unknown list argument: {unknown}"),
        ));
    }

    let has = |key: &str| list_args.get(key).is_some_and(|value| !value.is_null());

    if !has(IDS) && !has(LIMIT) {
        if has(AFTER) {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingPageLimitArgument,
                ctx,
                "missing page limit argument",
            ));
        }
        return Err(ValidationError::new(
            ValidationErrorKind::MissingListArguments,
            ctx,
            "missing list arguments",
        ));
    }

    if has(IDS) && (has(AFTER) || has(LIMIT)) {
        let given: Vec<&str> = list_args
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, _)| key.as_str())
            .collect();
        return Err(ValidationError::new(
            ValidationErrorKind::IllegalListArgumentsCombination,
            ctx,
            format!("illegal combination of list arguments: {}", given.join(",")),
        ));
    }

    Ok(())
}

/// Checks paging argument values.
///
/// `limit` must be a positive integer. `ids` and `after` hold identifiers
/// of the list's element type; when the schema declares an identifier type
/// for that element, every identifier must satisfy it.
pub(crate) fn check_values(
    ctx: &PathContext<'_>,
    schema: &Schema,
    element: &TypeDef,
    element_id: Option<&TypeDef>,
    list_args: &Map<String, Value>,
) -> ValidationResult {
    for (key, value) in list_args.iter().filter(|(_, value)| !value.is_null()) {
        let ctx = ctx.extend(key.as_str());
        match key.as_str() {
            LIMIT => {
                if !value.as_u64().is_some_and(|limit| limit > 0) {
                    return Err(mismatch(
                        &ctx,
                        format!("page limit must be a positive integer, got {value}"),
                    ));
                }
            }
            IDS => {
                let Some(ids) = value.as_array() else {
                    return Err(mismatch(&ctx, format!("expected a list of identifiers, got {value}")));
                };
                for (index, id) in ids.iter().enumerate() {
                    check_cursor(&ctx.extend(index.to_string()), schema, element, element_id, id)?;
                }
            }
            _ => check_cursor(&ctx, schema, element, element_id, value)?,
        }
    }
    Ok(())
}

fn check_cursor(
    ctx: &PathContext<'_>,
    schema: &Schema,
    element: &TypeDef,
    element_id: Option<&TypeDef>,
    value: &Value,
) -> ValidationResult {
    match element_id {
        Some(id_type) => check_identifier(ctx, id_type, value),
        None if value.is_string() => Ok(()),
        None => Err(mismatch(
            ctx,
            format!("expected an identifier of {}, got {value}", element.name()),
        )),
    }
}

fn mismatch(ctx: &PathContext<'_>, detail: String) -> ValidationError {
    ValidationError::new(ValidationErrorKind::MismatchingTypes, ctx, detail)
}
