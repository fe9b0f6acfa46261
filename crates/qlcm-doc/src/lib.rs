//! Workspace document loading for QLC Merge.
//!
//! A QLC+ workspace groups every function definition under a single `Engine`
//! element. This crate parses the XML, locates that container, and projects
//! each `Function` element beneath it into a [`FunctionRecord`].
//!
//! # Pipeline
//!
//! - [`extract::find_functions`] -- container lookup and function enumeration
//! - [`project::project_function`] -- element to record projection
//! - [`loader`] -- file and string entry points that run both steps
//!
//! [`FunctionRecord`]: qlcm_types::FunctionRecord

pub mod error;
pub mod extract;
pub mod loader;
pub mod project;

pub use error::{DocError, DocResult};
pub use extract::{find_functions, CONTAINER_TAG, FUNCTION_TAG};
pub use loader::{load_sequence, parse_document, sequence_from_str};
pub use project::project_function;
