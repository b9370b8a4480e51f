//! Error types, split by when they can occur.
//!
//! `LoadError` covers startup: the static data either parses and validates
//! or the process refuses to serve. `QueryError` covers per-request
//! validation and maps directly onto client-facing status codes.

use thiserror::Error;

/// Fatal construction-time failures. None of these can occur once the
/// process has started serving.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("malformed linkage: {0}")]
    MalformedLinkage(String),

    #[error("vocabulary has {vocab} words but linkage expects {linkage} leaves")]
    VocabLinkageMismatch { vocab: usize, linkage: usize },

    #[error("linkage references node {id} but only {total} dendrogram nodes exist")]
    NodeIndexOutOfRange { id: u32, total: usize },

    #[error("duplicate word in vocabulary: {0:?}")]
    DuplicateWord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-request failures surfaced to the caller as client errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("similarity must be between 0 and 1")]
    InvalidRange,

    #[error("hymn not found")]
    HymnNotFound,
}

pub type LoadResult<T> = Result<T, LoadError>;
pub type QueryResult<T> = Result<T, QueryError>;
