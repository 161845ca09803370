//! DOM Node Operations
//!
//! Error type shared by tree mutations and selector parsing.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error: {child} cannot be placed under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Node kind does not support the operation
    #[error("Invalid node type for this operation: {0}")]
    InvalidNodeType(NodeId),

    /// Node has no parent to operate on
    #[error("Node {0} is not attached to a parent")]
    Detached(NodeId),

    /// Node must be detached for this operation
    #[error("Node {0} is still attached")]
    Attached(NodeId),

    /// Selector text could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}
