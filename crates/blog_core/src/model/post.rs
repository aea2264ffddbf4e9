//! Post domain model.
//!
//! # Responsibility
//! - Hold the post record shape mirrored by the `posts` table.
//! - Run field validators whenever a post field is assigned.
//!
//! # Invariants
//! - Title, content, summary and category always satisfy their validators
//!   on records built in memory.
//! - `category` is stored as the exact literal `Fiction` or `Non-Fiction`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::validation::{
    validate_category, validate_content, validate_summary, validate_title, ValidationError,
};
use super::{DisplayId, RecordId};

/// Allowed post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostCategory {
    #[serde(rename = "Fiction")]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl PostCategory {
    /// Literal stored in `posts.category`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }

    pub(crate) fn from_db(value: &str) -> Option<Self> {
        match value {
            "Fiction" => Some(Self::Fiction),
            "Non-Fiction" => Some(Self::NonFiction),
            _ => None,
        }
    }
}

impl Display for PostCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted blog post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostFields")]
pub struct Post {
    id: Option<RecordId>,
    title: String,
    content: String,
    summary: String,
    category: PostCategory,
    created_at: Option<i64>,
    updated_at: Option<i64>,
}

impl Post {
    /// Creates an unsaved post.
    ///
    /// Fields are validated in order `title`, `content`, `summary`,
    /// `category`; the first failure is returned.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        summary: impl Into<String>,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        let content = content.into();
        validate_content(&content)?;
        let summary = summary.into();
        validate_summary(&summary)?;
        let category = validate_category(category)?;

        Ok(Self {
            id: None,
            title,
            content,
            summary,
            category,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn category(&self) -> PostCategory {
        self.category
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), ValidationError> {
        let content = content.into();
        validate_content(&content)?;
        self.content = content;
        Ok(())
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    pub fn set_category(&mut self, category: &str) -> Result<(), ValidationError> {
        self.category = validate_category(category)?;
        Ok(())
    }

    /// Re-runs the field validators on the current values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        validate_summary(&self.summary)?;
        Ok(())
    }

    /// Rebuilds a stored post without running validators.
    pub(crate) fn from_store(
        id: RecordId,
        title: String,
        content: String,
        summary: String,
        category: PostCategory,
        created_at: i64,
        updated_at: Option<i64>,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            content,
            summary,
            category,
            created_at: Some(created_at),
            updated_at,
        }
    }

    pub(crate) fn assign_store_fields(
        &mut self,
        id: RecordId,
        created_at: i64,
        updated_at: Option<i64>,
    ) {
        self.id = Some(id);
        self.created_at = Some(created_at);
        self.updated_at = updated_at;
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={} content={}, summary={})",
            DisplayId(self.id),
            self.title,
            self.content,
            self.summary
        )
    }
}

/// Wire shape used to validate deserialized posts.
#[derive(Deserialize)]
struct PostFields {
    #[serde(default)]
    id: Option<RecordId>,
    title: String,
    content: String,
    summary: String,
    category: String,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<PostFields> for Post {
    type Error = ValidationError;

    fn try_from(value: PostFields) -> Result<Self, Self::Error> {
        let mut post = Post::new(value.title, value.content, value.summary, &value.category)?;
        post.id = value.id;
        post.created_at = value.created_at;
        post.updated_at = value.updated_at;
        Ok(post)
    }
}
