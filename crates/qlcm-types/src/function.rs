use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Document-scoped identifier of a function definition.
///
/// Identifiers are unique within a well-formed workspace, but nothing enforces
/// that: a missing or malformed `ID` attribute falls back to
/// [`FunctionId::DEFAULT`], which can collide with a genuine `0`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FunctionId(i32);

impl FunctionId {
    /// The identifier assigned when the attribute cannot be parsed.
    pub const DEFAULT: Self = Self(0);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Parse an attribute value, falling back to [`FunctionId::DEFAULT`].
    ///
    /// The second element is `true` when the fallback was taken. Surrounding
    /// whitespace and a leading sign are accepted.
    pub fn parse_or_default(raw: Option<&str>) -> (Self, bool) {
        match raw.map(str::parse::<Self>) {
            Some(Ok(id)) => (id, false),
            _ => (Self::DEFAULT, true),
        }
    }
}

impl FromStr for FunctionId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| TypeError::InvalidFunctionId(s.to_string()))
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for FunctionId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A normalized function definition.
///
/// `content` is the element's inner markup, compared verbatim and never
/// interpreted. `mapped_id` is set at most once, by the aligner, when the
/// cross matcher pairs this record with a counterpart on the other side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub id: FunctionId,
    pub name: String,
    pub kind: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_id: Option<FunctionId>,
    /// The `ID` attribute was missing or malformed and `id` is the default.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub id_defaulted: bool,
}

impl FunctionRecord {
    pub fn new(
        id: impl Into<FunctionId>,
        name: impl Into<String>,
        kind: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            content: content.into(),
            mapped_id: None,
            id_defaulted: false,
        }
    }

    /// Returns `true` if either name is a prefix of the other.
    pub fn names_overlap(&self, other: &FunctionRecord) -> bool {
        self.name.starts_with(&other.name) || other.name.starts_with(&self.name)
    }

    /// Returns `true` if `other` has the same identifier and name.
    pub fn same_identity(&self, other: &FunctionRecord) -> bool {
        self.id == other.id && self.name == other.name
    }
}
