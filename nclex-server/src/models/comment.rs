//! Comment submission validation

use serde::Deserialize;

use super::review::MAX_AUTHOR_LEN;
use super::validation::required_text;
use super::ValidationError;

/// Comment body as received over the wire
#[derive(Debug, Clone, Deserialize)]
pub struct CommentSubmission {
    pub author: String,
    pub content: String,
}

/// Validated comment, ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub content: String,
}

impl NewComment {
    pub fn new(author: &str, content: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            author: required_text("author", author, Some(MAX_AUTHOR_LEN))?,
            content: required_text("content", content, None)?,
        })
    }
}

impl TryFrom<CommentSubmission> for NewComment {
    type Error = ValidationError;

    fn try_from(s: CommentSubmission) -> Result<Self, Self::Error> {
        Self::new(&s.author, &s.content)
    }
}
