//! Foundation types for QLC Merge.
//!
//! This crate provides the record types shared by the document loader and the
//! divergence engine. Every other QLC Merge crate depends on `qlcm-types`.
//!
//! # Key Types
//!
//! - [`FunctionId`] — Document-scoped integer identifier of a function definition
//! - [`FunctionRecord`] — Normalized projection of one `Function` element
//! - [`FunctionSequence`] — Ordered, index-addressable list of records from one document
//! - [`Side`] — Which of the two compared documents a value belongs to

pub mod error;
pub mod function;
pub mod sequence;

pub use error::TypeError;
pub use function::{FunctionId, FunctionRecord};
pub use sequence::{FunctionSequence, Side};
