use crate::kind::NodeKind;
use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    #[error("node {id} missing")]
    Missing { id: NodeId },
    #[error("node {id} has kind {actual:?}; expected {expected}")]
    UnexpectedKind {
        id: NodeId,
        actual: NodeKind,
        expected: &'static str,
    },
}

/// Raised when a portal is driven without a root node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortalError {
    #[error("portal element is missing root node")]
    MissingRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawError {
    #[error("raw markup is empty")]
    Empty,
    #[error("unexpected end of markup at byte {offset}")]
    UnexpectedEof { offset: usize },
    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedChar { offset: usize, found: char },
    #[error("closing tag </{found}> at byte {offset} does not match <{expected}>")]
    MismatchedClose {
        offset: usize,
        expected: String,
        found: String,
    },
    #[error("closing tag </{tag}> at byte {offset} has no matching open tag")]
    UnmatchedClose { offset: usize, tag: String },
}
