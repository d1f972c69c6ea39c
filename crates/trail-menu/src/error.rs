//! Menu error types.

use crate::key::Key;

/// Error raised by menu construction, lookup and population.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// A lookup path segment has no matching direct child.
    #[error("can not find item {key}")]
    NotFound {
        /// The first key that did not match.
        key: Key,
    },
    /// A sibling with the same key already exists.
    #[error("{parent} already has a child keyed {key}")]
    DuplicateKey {
        /// Key of the parent node.
        parent: Key,
        /// The duplicated key.
        key: Key,
    },
    /// A node index does not belong to this tree.
    #[error("node #{0} is not part of this menu")]
    UnknownNode(usize),
    /// Delegating activation would create a cycle.
    #[error("{key} can not activate {target}: delegation would form a cycle")]
    ActivationCycle {
        /// Node whose delegate was being set.
        key: Key,
        /// Requested delegate.
        target: Key,
    },
    /// A population rule failed.
    #[error("population failed: {0}")]
    Populate(String),
}
