//! Query node attributes and the sets of them a declaration accepts.

use std::fmt;

use super::TypeDef;

/// A recognized query node attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `args`: argument values for the property.
    Args,
    /// `listArgs`: paging arguments of a list property.
    ListArgs,
    /// `select`: sub-selection of a compound type.
    Select,
    /// `accept`: accepted member branches of a union.
    Accept,
}

impl Attribute {
    pub const ALL: [Self; 4] = [Self::Args, Self::ListArgs, Self::Select, Self::Accept];

    /// The key spelling used in query documents.
    pub fn key(self) -> &'static str {
        match self {
            Self::Args => "args",
            Self::ListArgs => "listArgs",
            Self::Select => "select",
            Self::Accept => "accept",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.key() == key)
    }

    fn bit(self) -> u8 {
        match self {
            Self::Args => 1,
            Self::ListArgs => 1 << 1,
            Self::Select => 1 << 2,
            Self::Accept => 1 << 3,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Small set of [`Attribute`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeSet(u8);

impl AttributeSet {
    pub const EMPTY: Self = Self(0);

    /// Attributes applicable to a property yielding `target`.
    ///
    /// `args` always applies; `listArgs` only to list properties; `select`
    /// only when the target has properties; `accept` only for unions.
    pub fn for_property(is_list: bool, target: &TypeDef) -> Self {
        let mut set = Self::EMPTY.with(Attribute::Args);
        if is_list {
            set = set.with(Attribute::ListArgs);
        }
        set.with_target_shape(target)
    }

    /// Attributes applicable to an `accept` branch of type `member`.
    pub fn for_branch(member: &TypeDef) -> Self {
        Self::EMPTY.with_target_shape(member)
    }

    fn with_target_shape(self, target: &TypeDef) -> Self {
        let mut set = self;
        if target.is_selectable() {
            set = set.with(Attribute::Select);
        }
        if target.is_union() {
            set = set.with(Attribute::Accept);
        }
        set
    }

    #[must_use]
    pub fn with(self, attr: Attribute) -> Self {
        Self(self.0 | attr.bit())
    }

    pub fn contains(self, attr: Attribute) -> bool {
        self.0 & attr.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL.into_iter().filter(move |attr| self.contains(*attr))
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = self.iter().map(Attribute::key).collect();
        if keys.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&keys.join(", "))
        }
    }
}
