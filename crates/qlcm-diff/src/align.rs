//! Sequence alignment: the two-pointer merge over two function sequences.
//!
//! Both sequences are walked by ascending identifier. When identifiers are out
//! of step, the record with the smaller identifier is consumed alone and the
//! other side is searched for a renamed or renumbered counterpart. When they
//! agree, the pair is checked on four axes (content, id, kind, name); the
//! first pair that mismatches on two or more axes is the fork point.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use qlcm_types::{FunctionId, FunctionRecord, FunctionSequence, Side};

use crate::config::PreviewConfig;
use crate::event::{DiffEvent, FunctionRef};
use crate::matcher::{find_counterpart, CrossMatch, Direction};
use crate::window::render_window;

/// Number of mismatching axes at which a pair counts as forked.
pub const FORK_THRESHOLD: usize = 2;

/// The offsets at which the sequences first forked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkPoint {
    pub left_index: usize,
    pub right_index: usize,
}

/// Which axes of a same-id pair disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatches {
    pub content: bool,
    pub id: bool,
    pub kind: bool,
    pub name: bool,
}

impl Mismatches {
    pub fn between(left: &FunctionRecord, right: &FunctionRecord) -> Self {
        Self {
            content: left.content != right.content,
            id: left.id != right.id,
            kind: left.kind != right.kind,
            name: left.name != right.name,
        }
    }

    pub fn count(&self) -> usize {
        [self.content, self.id, self.kind, self.name]
            .into_iter()
            .filter(|&m| m)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.count() == 0
    }
}

/// A same-id pair consumed together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub left_index: usize,
    pub right_index: usize,
    pub id: FunctionId,
    pub mismatches: Mismatches,
}

/// What the merge concluded about the two sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentOutcome {
    /// Left records consumed without a positional counterpart, by index.
    pub left_only: BTreeMap<usize, FunctionRecord>,
    /// Right records consumed without a positional counterpart, by index.
    pub right_only: BTreeMap<usize, FunctionRecord>,
    pub aligned: Vec<AlignedPair>,
    pub fork_point: Option<ForkPoint>,
    /// Greatest identifier among same-id pairs.
    pub last_shared_id: Option<FunctionId>,
}

impl AlignmentOutcome {
    pub fn only(&self, side: Side) -> &BTreeMap<usize, FunctionRecord> {
        match side {
            Side::Left => &self.left_only,
            Side::Right => &self.right_only,
        }
    }

    fn only_mut(&mut self, side: Side) -> &mut BTreeMap<usize, FunctionRecord> {
        match side {
            Side::Left => &mut self.left_only,
            Side::Right => &mut self.right_only,
        }
    }

    /// Returns `true` if every record was aligned with an identical partner.
    pub fn is_identical(&self) -> bool {
        self.left_only.is_empty()
            && self.right_only.is_empty()
            && self.aligned.iter().all(|p| p.mismatches.is_clean())
    }
}

/// The outcome of a comparison together with the events that explain it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub outcome: AlignmentOutcome,
    pub events: Vec<DiffEvent>,
}

/// Align two function sequences and collect the report events.
pub fn align(
    left: &FunctionSequence,
    right: &FunctionSequence,
    config: &PreviewConfig,
) -> Comparison {
    Aligner::new(left, right, config).run()
}

struct Aligner<'a> {
    left: &'a FunctionSequence,
    right: &'a FunctionSequence,
    config: &'a PreviewConfig,
    left_offset: usize,
    right_offset: usize,
    synced: bool,
    outcome: AlignmentOutcome,
    events: Vec<DiffEvent>,
}

impl<'a> Aligner<'a> {
    fn new(left: &'a FunctionSequence, right: &'a FunctionSequence, config: &'a PreviewConfig) -> Self {
        Self {
            left,
            right,
            config,
            left_offset: 0,
            right_offset: 0,
            synced: true,
            outcome: AlignmentOutcome::default(),
            events: Vec::new(),
        }
    }

    fn run(mut self) -> Comparison {
        let (lefts, rights) = (self.left, self.right);
        while self.left_offset < lefts.len() && self.right_offset < rights.len() {
            let Some(left) = lefts.get(self.left_offset) else {
                self.left_offset += 1;
                continue;
            };
            let Some(right) = rights.get(self.right_offset) else {
                self.right_offset += 1;
                continue;
            };

            match left.id.cmp(&right.id) {
                Ordering::Greater => self.consume_unpaired(Side::Right, right),
                Ordering::Less => self.consume_unpaired(Side::Left, left),
                Ordering::Equal => self.consume_pair(left, right),
            }
        }

        self.capture_remainder(Side::Left);
        self.capture_remainder(Side::Right);
        self.events.push(DiffEvent::ForkPoint {
            fork: self.outcome.fork_point,
        });

        debug!(
            left_only = self.outcome.only(Side::Left).len(),
            right_only = self.outcome.only(Side::Right).len(),
            aligned = self.outcome.aligned.len(),
            mismatches = self.events.iter().filter(|e| e.is_mismatch()).count(),
            forked = self.outcome.fork_point.is_some(),
            "alignment complete"
        );

        Comparison {
            outcome: self.outcome,
            events: self.events,
        }
    }

    fn sequence(&self, side: Side) -> &'a FunctionSequence {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn offset_mut(&mut self, side: Side) -> &mut usize {
        match side {
            Side::Left => &mut self.left_offset,
            Side::Right => &mut self.right_offset,
        }
    }

    /// Consume `record` from `side` alone, looking for it on the other side.
    fn consume_unpaired(&mut self, side: Side, record: &FunctionRecord) {
        let index = *self.offset_mut(side);
        let found = self.search_other_side(side, record, None);

        let mut record = record.clone();
        match found {
            Some(id) => record.mapped_id = Some(id),
            None => {
                let function = FunctionRef::from(&record);
                self.events.push(match side {
                    Side::Left => DiffEvent::LeftOnly { index, function },
                    Side::Right => DiffEvent::RightOnly { index, function },
                });
            }
        }

        self.outcome.only_mut(side).insert(index, record);
        *self.offset_mut(side) += 1;
    }

    /// Consume a same-id pair and check it for divergence.
    fn consume_pair(&mut self, left: &FunctionRecord, right: &FunctionRecord) {
        let mismatches = Mismatches::between(left, right);

        if mismatches.content {
            self.events.push(DiffEvent::ContentMismatch {
                left_index: self.left_offset,
                right_index: self.right_offset,
                function: left.into(),
            });
            let moved_right = self.search_other_side(Side::Left, left, Some(right));
            let moved_left = self.search_other_side(Side::Right, right, Some(left));
            if moved_right.is_none() && moved_left.is_none() {
                let preview = render_window(&left.content, &right.content, self.config);
                self.events.push(DiffEvent::Preview(preview));
            }
        }
        if mismatches.id {
            self.events.push(DiffEvent::IdMismatch {
                left: left.id,
                right: right.id,
            });
        }
        if mismatches.kind {
            self.events.push(DiffEvent::KindMismatch {
                left: left.into(),
                right: right.into(),
            });
        }
        if mismatches.name {
            self.events.push(DiffEvent::NameMismatch {
                left: left.into(),
                right: right.into(),
            });
        }

        if mismatches.count() >= FORK_THRESHOLD {
            if self.synced {
                self.outcome.fork_point = Some(ForkPoint {
                    left_index: self.left_offset,
                    right_index: self.right_offset,
                });
                debug!(left = self.left_offset, right = self.right_offset, "fork point recorded");
            }
            self.synced = false;
        }

        let shared = left.id.max(right.id);
        self.outcome.last_shared_id = self.outcome.last_shared_id.max(Some(shared));
        self.outcome.aligned.push(AlignedPair {
            left_index: self.left_offset,
            right_index: self.right_offset,
            id: left.id,
            mismatches,
        });
        self.left_offset += 1;
        self.right_offset += 1;
    }

    /// Cross-match a record from `side` against the opposite sequence.
    ///
    /// Emits the search's events and returns the exact match's id, if any.
    fn search_other_side(
        &mut self,
        side: Side,
        record: &FunctionRecord,
        exclude: Option<&FunctionRecord>,
    ) -> Option<FunctionId> {
        let direction = match side {
            Side::Left => Direction::Forward,
            Side::Right => Direction::Backward,
        };
        let found = find_counterpart(record, self.sequence(side.opposite()), direction, exclude);
        self.record_search(record.id, &found);
        found.exact.map(|r| r.id)
    }

    fn record_search(&mut self, reference: FunctionId, found: &CrossMatch<'_>) {
        let direction = found.direction;
        self.events.extend(found.possible.iter().map(|&candidate| DiffEvent::Possible {
            reference,
            direction,
            candidate,
        }));
        if let Some(exact) = found.exact {
            self.events.push(DiffEvent::Matched {
                reference,
                direction,
                candidate: exact.id,
            });
        }
    }

    /// Move every unconsumed record of `side` into its "only" map.
    fn capture_remainder(&mut self, side: Side) {
        let sequence = self.sequence(side);
        let offset = *self.offset_mut(side);
        if sequence.len() <= offset {
            return;
        }

        self.events.push(DiffEvent::Trailing {
            side,
            count: sequence.len() - offset,
            last_shared_id: self.outcome.last_shared_id,
            last_index: offset.checked_sub(1),
        });
        let only = self.outcome.only_mut(side);
        for (index, record) in sequence.records().skip_while(|(i, _)| *i < offset) {
            only.insert(index, record.clone());
        }
        *self.offset_mut(side) = sequence.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: i32, name: &str, content: &str) -> FunctionRecord {
        FunctionRecord::new(id, name, "Scene", content)
    }

    fn seq(records: &[FunctionRecord]) -> FunctionSequence {
        FunctionSequence::from_records(records.iter().cloned())
    }

    fn base() -> Vec<FunctionRecord> {
        vec![
            rec(0, "Red", "<V>255</V>"),
            rec(1, "Green", "<V>128</V>"),
            rec(2, "Blue", "<V>64</V>"),
            rec(3, "White", "<V>32</V>"),
        ]
    }

    fn compare(left: &[FunctionRecord], right: &[FunctionRecord]) -> Comparison {
        align(&seq(left), &seq(right), &PreviewConfig::default())
    }

    #[test]
    fn identical_sequences() {
        let records = base();
        let result = compare(&records, &records);

        assert!(result.outcome.left_only.is_empty());
        assert!(result.outcome.right_only.is_empty());
        assert!(result.outcome.fork_point.is_none());
        assert_eq!(result.outcome.last_shared_id, Some(FunctionId::new(3)));
        assert!(result.outcome.is_identical());
        assert_eq!(result.events, vec![DiffEvent::ForkPoint { fork: None }]);
    }

    #[test]
    fn pure_insertion_on_right() {
        let left = base();
        let mut right = base();
        right.push(rec(10, "Amber", "<V>1</V>"));

        let result = compare(&left, &right);
        assert!(result.outcome.left_only.is_empty());
        assert_eq!(result.outcome.right_only.len(), 1);
        assert_eq!(result.outcome.right_only[&4].id, FunctionId::new(10));
        assert!(result.outcome.fork_point.is_none());
        assert!(result.events.contains(&DiffEvent::Trailing {
            side: Side::Right,
            count: 1,
            last_shared_id: Some(FunctionId::new(3)),
            last_index: Some(3),
        }));
    }

    #[test]
    fn two_axis_mismatch_forks() {
        let left = base();
        let mut right = base();
        right[2] = rec(2, "Navy", "<V>70</V>");

        let result = compare(&left, &right);
        assert_eq!(
            result.outcome.fork_point,
            Some(ForkPoint {
                left_index: 2,
                right_index: 2
            })
        );
        assert_eq!(result.outcome.aligned[2].mismatches.count(), 2);
    }

    #[test]
    fn single_axis_mismatch_does_not_fork() {
        let left = base();
        let mut right = base();
        right[1].kind = "Chaser".into();

        let result = compare(&left, &right);
        assert!(result.outcome.fork_point.is_none());
        assert!(result.events.iter().any(|e| matches!(e, DiffEvent::KindMismatch { .. })));
        assert_eq!(result.outcome.last_shared_id, Some(FunctionId::new(3)));
    }

    #[test]
    fn fork_point_is_not_moved_by_later_forks() {
        let left = base();
        let mut right = base();
        right[1] = rec(1, "Lime", "<V>1</V>");
        right[3] = rec(3, "Grey", "<V>2</V>");

        let result = compare(&left, &right);
        assert_eq!(
            result.outcome.fork_point,
            Some(ForkPoint {
                left_index: 1,
                right_index: 1
            })
        );
        let forks = result.outcome.aligned.iter().filter(|p| p.mismatches.count() >= 2).count();
        assert_eq!(forks, 2);
    }

    #[test]
    fn left_remainder_is_captured() {
        let mut left = base();
        left.extend([rec(4, "A", ""), rec(5, "B", ""), rec(6, "C", "")]);
        let right = base();

        let result = compare(&left, &right);
        let keys: Vec<usize> = result.outcome.left_only.keys().copied().collect();
        assert_eq!(keys, vec![4, 5, 6]);
        assert!(result.events.contains(&DiffEvent::Trailing {
            side: Side::Left,
            count: 3,
            last_shared_id: Some(FunctionId::new(3)),
            last_index: Some(3),
        }));
    }

    #[test]
    fn trailing_is_reported_before_fork_point() {
        let mut left = base();
        left.push(rec(4, "Extra", ""));
        let result = compare(&left, &base());
        let n = result.events.len();
        assert!(matches!(result.events[n - 2], DiffEvent::Trailing { .. }));
        assert!(matches!(result.events[n - 1], DiffEvent::ForkPoint { .. }));
    }

    #[test]
    fn deleted_record_is_left_only() {
        let left = base();
        let right = vec![base()[0].clone(), base()[2].clone(), base()[3].clone()];

        let result = compare(&left, &right);
        assert_eq!(result.outcome.left_only.len(), 1);
        assert_eq!(result.outcome.left_only[&1].name, "Green");
        assert!(result.outcome.left_only[&1].mapped_id.is_none());
        assert!(result.events.contains(&DiffEvent::LeftOnly {
            index: 1,
            function: FunctionRef::from(&base()[1]),
        }));
        assert!(result.outcome.fork_point.is_none());
    }

    #[test]
    fn renumbered_record_is_mapped() {
        // Right renumbered "Green" from 1 to 7 and moved it to the end.
        let left = base();
        let mut right = vec![base()[0].clone(), base()[2].clone(), base()[3].clone()];
        right.push(FunctionRecord::new(7, "Green", "Scene", "<V>128</V>"));

        let result = compare(&left, &right);
        assert_eq!(result.outcome.left_only[&1].mapped_id, Some(FunctionId::new(7)));
        assert!(result.events.contains(&DiffEvent::Matched {
            reference: FunctionId::new(1),
            direction: Direction::Forward,
            candidate: FunctionId::new(7),
        }));
        assert!(!result
            .events
            .iter()
            .any(|e| matches!(e, DiffEvent::LeftOnly { .. })));
    }

    #[test]
    fn right_record_with_smaller_id_is_right_only() {
        let left = vec![rec(5, "Five", "")];
        let right = vec![rec(2, "Two", ""), rec(5, "Five", "")];

        let result = compare(&left, &right);
        assert_eq!(result.outcome.right_only[&0].id, FunctionId::new(2));
        assert!(result.events.contains(&DiffEvent::RightOnly {
            index: 0,
            function: FunctionRef::from(&right[0]),
        }));
        assert_eq!(result.outcome.aligned.len(), 1);
        assert_eq!(result.outcome.aligned[0].right_index, 1);
    }

    #[test]
    fn content_mismatch_renders_preview() {
        let left = vec![rec(1, "Red", "<V>255</V>")];
        let right = vec![rec(1, "Red", "<V>254</V>")];

        let result = compare(&left, &right);
        assert!(result.outcome.fork_point.is_none());
        assert_eq!(
            result.events,
            vec![
                DiffEvent::ContentMismatch {
                    left_index: 0,
                    right_index: 0,
                    function: FunctionRef::from(&left[0]),
                },
                DiffEvent::Preview(render_window(
                    "<V>255</V>",
                    "<V>254</V>",
                    &PreviewConfig::default()
                )),
                DiffEvent::ForkPoint { fork: None },
            ]
        );
    }

    #[test]
    fn content_found_elsewhere_skips_preview() {
        // Right swapped the contents of "Red" into "Red Copy" (id 9).
        let left = vec![rec(1, "Red", "<V>255</V>")];
        let right = vec![rec(1, "Red", "<V>0</V>"), rec(9, "Red Copy", "<V>255</V>")];

        let result = compare(&left, &right);
        assert!(result.events.contains(&DiffEvent::Matched {
            reference: FunctionId::new(1),
            direction: Direction::Forward,
            candidate: FunctionId::new(9),
        }));
        assert!(!result.events.iter().any(|e| matches!(e, DiffEvent::Preview(_))));
    }

    #[test]
    fn unprojectable_slots_are_skipped() {
        let left = FunctionSequence::new(vec![Some(rec(0, "Red", "a")), None, Some(rec(1, "Green", "b"))]);
        let right = FunctionSequence::new(vec![None, Some(rec(0, "Red", "a")), Some(rec(1, "Green", "b"))]);

        let result = align(&left, &right, &PreviewConfig::default());
        assert!(result.outcome.is_identical());
        let pairs: Vec<(usize, usize)> = result
            .outcome
            .aligned
            .iter()
            .map(|p| (p.left_index, p.right_index))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (2, 2)]);
    }

    #[test]
    fn defaulted_ids_collide() {
        // Two unrelated functions with unreadable ids both become 0 and get paired.
        let mut a = rec(0, "Intro", "<Step>1</Step>");
        a.id_defaulted = true;
        let mut b = rec(0, "Finale", "<Step>9</Step>");
        b.id_defaulted = true;

        let result = compare(&[a], &[b]);
        assert_eq!(result.outcome.aligned.len(), 1);
        assert_eq!(
            result.outcome.fork_point,
            Some(ForkPoint {
                left_index: 0,
                right_index: 0
            })
        );
    }

    #[test]
    fn empty_side_moves_everything_to_remainder() {
        let result = compare(&base(), &[]);
        assert_eq!(result.outcome.left_only.len(), 4);
        assert!(result.outcome.last_shared_id.is_none());
        assert!(result.events.contains(&DiffEvent::Trailing {
            side: Side::Left,
            count: 4,
            last_shared_id: None,
            last_index: None,
        }));
    }

    #[test]
    fn mismatch_axes_count() {
        let a = FunctionRecord::new(1, "A", "Scene", "x");
        let b = FunctionRecord::new(1, "B", "Chaser", "y");
        let m = Mismatches::between(&a, &b);
        assert_eq!(m.count(), 3);
        assert!(!m.id);
        assert!(Mismatches::between(&a, &a).is_clean());
    }
}
