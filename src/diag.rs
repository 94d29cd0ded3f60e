//! Validation error taxonomy and diagnostic rendering.
//!
//! Every failure raised while checking a query document is a
//! [`ValidationError`]: a [`ValidationErrorKind`], the dotted path of the
//! offending query fragment, and a free-text detail. The rendered message is
//! always `"<path>: <detail>"`.

use miette::{Diagnostic, Report, Severity};
use std::fmt;
use thiserror::Error;

use crate::validator::PathContext;

/// Result alias used throughout validation.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// The closed set of structural violations a query can commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Top-level key is neither a root property nor a `prop = @alias` form.
    InvalidPropertySelector,

    /// Key names a property the current type does not declare.
    UndefinedProperty,

    /// `listArgs` carries a key other than `ids`, `after`, or `limit`.
    UnknownListArgument,

    /// `listArgs` supplies neither `ids` nor `limit`.
    MissingListArguments,

    /// `listArgs.after` without `limit` (and without `ids`).
    MissingPageLimitArgument,

    /// `listArgs.ids` combined with `after` or `limit`.
    IllegalListArgumentsCombination,

    /// A sub-selection is present but empty.
    MissingSelector,

    /// An accepted type is not a member of the union.
    UndefinedType,

    /// A literal does not fit its declared type.
    MismatchingTypes,

    /// A query node carries an attribute its declaration does not allow.
    UnexpectedAttribute,
}

impl ValidationErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::InvalidPropertySelector,
        Self::UndefinedProperty,
        Self::UnknownListArgument,
        Self::MissingListArguments,
        Self::MissingPageLimitArgument,
        Self::IllegalListArgumentsCombination,
        Self::MissingSelector,
        Self::UndefinedType,
        Self::MismatchingTypes,
        Self::UnexpectedAttribute,
    ];

    /// Returns a human-readable name for this error kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::InvalidPropertySelector => "InvalidPropertySelector",
            Self::UndefinedProperty => "UndefinedProperty",
            Self::UnknownListArgument => "UnknownListArgument",
            Self::MissingListArguments => "MissingListArguments",
            Self::MissingPageLimitArgument => "MissingPageLimitArgument",
            Self::IllegalListArgumentsCombination => "IllegalListArgumentsCombination",
            Self::MissingSelector => "MissingSelector",
            Self::UndefinedType => "UndefinedType",
            Self::MismatchingTypes => "MismatchingTypes",
            Self::UnexpectedAttribute => "UnexpectedAttribute",
        }
    }

    /// Stable diagnostic code, e.g. `query::undefined_property`.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidPropertySelector => "query::invalid_property_selector",
            Self::UndefinedProperty => "query::undefined_property",
            Self::UnknownListArgument => "query::unknown_list_argument",
            Self::MissingListArguments => "query::missing_list_arguments",
            Self::MissingPageLimitArgument => "query::missing_page_limit_argument",
            Self::IllegalListArgumentsCombination => "query::illegal_list_arguments_combination",
            Self::MissingSelector => "query::missing_selector",
            Self::UndefinedType => "query::undefined_type",
            Self::MismatchingTypes => "query::mismatching_types",
            Self::UnexpectedAttribute => "query::unexpected_attribute",
        }
    }

    fn help(self) -> &'static str {
        match self {
            Self::InvalidPropertySelector => {
                "top-level keys must be a root property or of the form `property = @alias`"
            }
            Self::UndefinedProperty => "check the property name against the schema",
            Self::UnknownListArgument => "list arguments are `ids`, `after`, and `limit`",
            Self::MissingListArguments => "provide either `ids` or `limit`",
            Self::MissingPageLimitArgument => "`after` requires `limit`",
            Self::IllegalListArgumentsCombination => {
                "`ids` cannot be combined with `after` or `limit`"
            }
            Self::MissingSelector => "select at least one property",
            Self::UndefinedType => "only member types of the union can be accepted",
            Self::MismatchingTypes => "the value does not fit the declared type",
            Self::UnexpectedAttribute => "remove the attribute; the property does not support it",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validation failure qualified with the path where it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {detail}")]
pub struct ValidationError {
    kind: ValidationErrorKind,
    path: String,
    detail: String,
}

impl ValidationError {
    /// Creates an error of `kind` at the location described by `ctx`.
    pub fn new(kind: ValidationErrorKind, ctx: &PathContext<'_>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            path: ctx.render(),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// The dotted root-to-violation path, e.g. `root.users.nickname`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Returns true if this error is of the given kind.
    pub fn is(&self, kind: ValidationErrorKind) -> bool {
        self.kind == kind
    }

    /// Converts this error into a miette [`Report`] for rendering.
    pub fn to_report(&self) -> Report {
        Report::new(self.clone())
    }
}

impl Diagnostic for ValidationError {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.help()))
    }
}
