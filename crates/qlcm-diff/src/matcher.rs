//! Cross matching: find a record's counterpart on the other side under a
//! different identifier.
//!
//! A candidate is a structural match when its kind equals the reference's and
//! one name is a prefix of the other. A structural match whose content is also
//! identical is an exact match and ends the search; any other structural match
//! is only a possible match and the scan continues.

use std::fmt;

use serde::{Deserialize, Serialize};

use qlcm_types::{FunctionId, FunctionRecord, FunctionSequence};

/// Which way a search crosses between the documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// A left record searched for on the right.
    Forward,
    /// A right record searched for on the left.
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "->"),
            Direction::Backward => write!(f, "<-"),
        }
    }
}

/// Outcome of one cross-match search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossMatch<'a> {
    pub direction: Direction,
    /// Structural matches with differing content, in scan order.
    pub possible: Vec<FunctionId>,
    /// The first structural match with identical content.
    pub exact: Option<&'a FunctionRecord>,
}

/// Search `candidates` for a counterpart of `reference`.
///
/// `exclude` removes one record (same identifier and name) from
/// consideration, so a record is not matched against its own positional
/// partner. Unprojectable slots are skipped.
pub fn find_counterpart<'a>(
    reference: &FunctionRecord,
    candidates: &'a FunctionSequence,
    direction: Direction,
    exclude: Option<&FunctionRecord>,
) -> CrossMatch<'a> {
    let mut possible = Vec::new();

    for (_, candidate) in candidates.records() {
        if exclude.is_some_and(|ex| ex.same_identity(candidate)) {
            continue;
        }
        if candidate.kind != reference.kind || !candidate.names_overlap(reference) {
            continue;
        }
        if candidate.content == reference.content {
            return CrossMatch {
                direction,
                possible,
                exact: Some(candidate),
            };
        }
        possible.push(candidate.id);
    }

    CrossMatch {
        direction,
        possible,
        exact: None,
    }
}
