//! # Errors
//!
//! All fallible operations in this crate return [`Result`]. Parse failures in
//! structural files (mappings, partition assignments, metis bodies) are fatal;
//! edge-list ingestion instead skips malformed lines and only surfaces them as
//! counters, see [`EdgeList`](crate::ingest::EdgeList).

use std::path::PathBuf;

use thiserror::Error;

use crate::node::DenseNode;

/// The crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An expected input file does not exist. Fatal for the dataset it
    /// belongs to; batch processing continues with the next dataset.
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A line of a structural file could not be parsed.
    #[error("line {line_no}: {what}")]
    InvalidLine { line_no: usize, what: String },

    /// A loaded mapping assigns the same raw or dense id twice.
    #[error("mapping is not a bijection: {side} id {id} occurs more than once")]
    NotABijection { side: &'static str, id: u64 },

    /// An input does not have the number of entries the mapping promises.
    #[error("expected {expected} entries but found {found}")]
    CardinalityMismatch { expected: usize, found: usize },

    /// A metis body does not reproduce the edge count its header claims.
    #[error("header claims {header} edges but the body contains {body} adjacency entries")]
    HeaderMismatch { header: u64, body: u64 },

    /// A dense id within `1..=n` has no reverse mapping to a raw id.
    #[error("dense id {0} has no reverse mapping")]
    UnmappedDenseId(DenseNode),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
