//! Structured report events emitted by the aligner, in traversal order.

use serde::{Deserialize, Serialize};

use qlcm_types::{FunctionId, FunctionRecord, Side};

use crate::align::ForkPoint;
use crate::matcher::Direction;
use crate::window::Preview;

/// The identifying attributes of a record, without its content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRef {
    pub id: FunctionId,
    pub kind: String,
    pub name: String,
}

impl From<&FunctionRecord> for FunctionRef {
    fn from(record: &FunctionRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind.clone(),
            name: record.name.clone(),
        }
    }
}

/// One observation made while comparing two function sequences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiffEvent {
    /// A left record with no counterpart on the right.
    LeftOnly { index: usize, function: FunctionRef },
    /// A right record with no counterpart on the left.
    RightOnly { index: usize, function: FunctionRef },
    /// A counterpart with identical content was found under another id.
    Matched {
        reference: FunctionId,
        direction: Direction,
        candidate: FunctionId,
    },
    /// A structurally similar record whose content differs.
    Possible {
        reference: FunctionId,
        direction: Direction,
        candidate: FunctionId,
    },
    /// Same-id records whose content differs.
    ContentMismatch {
        left_index: usize,
        right_index: usize,
        function: FunctionRef,
    },
    IdMismatch { left: FunctionId, right: FunctionId },
    KindMismatch { left: FunctionRef, right: FunctionRef },
    NameMismatch { left: FunctionRef, right: FunctionRef },
    /// Where two differing content blobs first diverge.
    Preview(Preview),
    /// Records left over on one side once the other is exhausted.
    Trailing {
        side: Side,
        count: usize,
        last_shared_id: Option<FunctionId>,
        last_index: Option<usize>,
    },
    /// The recorded fork point, reported once at the end.
    ForkPoint { fork: Option<ForkPoint> },
}

impl DiffEvent {
    /// Returns `true` for events that describe a same-id mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            DiffEvent::ContentMismatch { .. }
                | DiffEvent::IdMismatch { .. }
                | DiffEvent::KindMismatch { .. }
                | DiffEvent::NameMismatch { .. }
        )
    }
}
