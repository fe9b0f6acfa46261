use std::fmt;

use serde::{Deserialize, Serialize};

use crate::function::{FunctionId, FunctionRecord};

/// Which of the two compared documents a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "LEFT"),
            Side::Right => write!(f, "RIGHT"),
        }
    }
}

/// The ordered function definitions of one document.
///
/// Order is document order and is the alignment axis. A slot is `None` when
/// the element at that position could not be projected into a record; the
/// position still counts so indices line up with the source document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSequence {
    slots: Vec<Option<FunctionRecord>>,
}

impl FunctionSequence {
    pub fn new(slots: Vec<Option<FunctionRecord>>) -> Self {
        Self { slots }
    }

    /// Build a sequence in which every position is projectable.
    pub fn from_records(records: impl IntoIterator<Item = FunctionRecord>) -> Self {
        Self {
            slots: records.into_iter().map(Some).collect(),
        }
    }

    /// Number of positions, projectable or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The record at `index`, or `None` if out of range or unprojectable.
    pub fn get(&self, index: usize) -> Option<&FunctionRecord> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Iterate projectable records with their positions.
    pub fn records(&self) -> impl Iterator<Item = (usize, &FunctionRecord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (i, r)))
    }

    /// Greatest identifier among projectable records.
    pub fn max_id(&self) -> Option<FunctionId> {
        self.records().map(|(_, r)| r.id).max()
    }

    /// Records whose identifier had to be defaulted during projection.
    pub fn defaulted_ids(&self) -> impl Iterator<Item = (usize, &FunctionRecord)> {
        self.records().filter(|(_, r)| r.id_defaulted)
    }
}

impl FromIterator<FunctionRecord> for FunctionSequence {
    fn from_iter<I: IntoIterator<Item = FunctionRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
