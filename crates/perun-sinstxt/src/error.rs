//! Error types for TXT format decoding and path queries.

use thiserror::Error;

/// Errors that can occur when decoding a document or querying its tree.
#[derive(Debug, Error)]
pub enum Error {
    /// A content line did not match the line grammar.
    #[error("line {line} does not match the line grammar: {content:?}")]
    Malformed { line: usize, content: String },

    /// A line nested more than one level deeper than its predecessor.
    #[error("line {line} skips to nesting level {level} (at most {max} allowed)")]
    LevelSkip { line: usize, level: usize, max: usize },

    /// A path expression could not be parsed.
    #[error("invalid path expression: {0:?}")]
    PathSyntax(String),

    /// A path expected to match exactly one node matched several.
    #[error("path {path:?} matched {found} nodes, expected exactly one")]
    Ambiguous { path: String, found: usize },

    /// A path expected to yield a value matched nothing, or matched a
    /// node without a value.
    #[error("no value at path {path:?}")]
    MissingValue { path: String },

    /// A referenced attribute is absent on a matched node.
    #[error("node {tag:?} has no {attr:?} attribute")]
    MissingAttribute { tag: String, attr: String },

    /// A `Level` node's index attribute is not a valid integer.
    #[error("level index {index:?} is not an integer")]
    BadLevelIndex { index: String },
}

/// Result type for TXT format operations.
pub type Result<T> = std::result::Result<T, Error>;
