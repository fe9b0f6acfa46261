//! Entry points that turn workspace text or files into [`FunctionSequence`]s.

use std::path::Path;

use roxmltree::{Document, ParsingOptions};
use tracing::debug;

use qlcm_types::FunctionSequence;

use crate::error::{DocError, DocResult};
use crate::extract::find_functions;
use crate::project::project_function;

/// Parse workspace text as XML.
///
/// QLC+ workspaces carry a `<!DOCTYPE Workspace>` declaration, so DTDs are
/// allowed.
pub fn parse_document(text: &str) -> DocResult<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Parse workspace text and project its functions.
///
/// Fails with [`DocError::ContainerNotFound`] when there is no `Engine`
/// element and with [`DocError::NoFunctions`] when it is empty.
pub fn sequence_from_str(text: &str) -> DocResult<FunctionSequence> {
    let doc = parse_document(text)?;
    let nodes = find_functions(&doc).ok_or(DocError::ContainerNotFound)?;
    if nodes.is_empty() {
        return Err(DocError::NoFunctions);
    }

    let sequence = FunctionSequence::new(nodes.into_iter().map(project_function).collect());
    debug!(
        functions = sequence.len(),
        max_id = ?sequence.max_id(),
        defaulted_ids = sequence.defaulted_ids().count(),
        "extracted functions"
    );
    Ok(sequence)
}

/// Read a workspace file and project its functions.
pub fn load_sequence(path: impl AsRef<Path>) -> DocResult<FunctionSequence> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "loaded workspace");
    sequence_from_str(&text)
}
