//! Divergence engine for QLC Merge.
//!
//! Aligns the function lists of two workspace versions and explains, in
//! order, where they diverge: functions present on one side only, functions
//! that moved or were renumbered, same-id functions whose content differs,
//! and the first point at which the lists stop being in step.
//!
//! # Key Types
//!
//! - [`align`] / [`Comparison`] / [`AlignmentOutcome`] -- the two-pointer merge and its result
//! - [`find_counterpart`] / [`CrossMatch`] -- name and type heuristics for moved functions
//! - [`render_window`] / [`Preview`] -- fixed-width preview of the first differing character
//! - [`DiffEvent`] -- structured report events; [`report`] renders them as text

pub mod align;
pub mod config;
pub mod error;
pub mod event;
pub mod matcher;
pub mod report;
pub mod window;

pub use align::{align, AlignedPair, AlignmentOutcome, Comparison, ForkPoint, Mismatches};
pub use config::PreviewConfig;
pub use error::{DiffError, DiffResult};
pub use event::{DiffEvent, FunctionRef};
pub use matcher::{find_counterpart, CrossMatch, Direction};
pub use report::{render_event, report_lines, write_report, ReportSink, VecSink};
pub use window::{render_window, Preview};
