//! Newtype wrappers for opaque identifiers
//!
//! Questions and their source documents are both identified by strings coming
//! from the capture layer. Wrapping them keeps the two from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// The identifier of one captured question
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Arc<str>);

impl QuestionId {
    /// Creates a new QuestionId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this question ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for QuestionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque reference to the document a question was clipped from
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(Arc<str>);

impl DocumentRef {
    /// Creates a new DocumentRef from a string
    pub fn new(reference: impl Into<Arc<str>>) -> Self {
        Self(reference.into())
    }

    /// Returns the string representation of this document reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentRef {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for DocumentRef {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for DocumentRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
