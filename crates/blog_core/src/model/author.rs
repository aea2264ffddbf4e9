//! Author domain model.
//!
//! # Responsibility
//! - Hold the author record shape mirrored by the `authors` table.
//! - Run field validators whenever `name` or `phone_number` is assigned.
//!
//! # Invariants
//! - An in-memory `Author` always has a non-empty name and a ten-digit
//!   phone number, because every write path goes through a validator.
//! - `id`, `created_at` and `updated_at` are owned by the store and are
//!   `None` until the record has been persisted.
//! - Name uniqueness is not checked here; see `repo::author_repo`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::validation::{validate_name, validate_phone, ValidationError};
use super::{DisplayId, RecordId};

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorFields")]
pub struct Author {
    id: Option<RecordId>,
    name: String,
    phone_number: String,
    created_at: Option<i64>,
    updated_at: Option<i64>,
}

impl Author {
    /// Creates an unsaved author, validating `name` then `phone_number`.
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Display,
    ) -> Result<Self, ValidationError> {
        Self::builder().name(name).phone_number(phone_number).build()
    }

    /// Starts a builder where any field may be left unset.
    pub fn builder() -> AuthorBuilder {
        AuthorBuilder::default()
    }

    /// Store-assigned identifier; `None` before insert.
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Insert timestamp in epoch milliseconds, set by the store.
    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    /// Last update timestamp in epoch milliseconds; `None` until first update.
    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    /// Replaces the name after validation. On error the record is unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the phone number after validation. On error the record is unchanged.
    pub fn set_phone_number(&mut self, phone_number: impl Display) -> Result<(), ValidationError> {
        self.phone_number = validate_phone(phone_number)?;
        Ok(())
    }

    /// Re-runs the field validators on the current values.
    ///
    /// Records loaded from the store are not validated on read, so write
    /// paths call this before any SQL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_phone(&self.phone_number)?;
        Ok(())
    }

    /// Rebuilds a stored author without running validators.
    ///
    /// Rows written before a rule existed must still load.
    pub(crate) fn from_store(
        id: RecordId,
        name: String,
        phone_number: String,
        created_at: i64,
        updated_at: Option<i64>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            phone_number,
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

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author(id={}, name={})", DisplayId(self.id), self.name)
    }
}

/// Field-by-field author construction.
///
/// Fields are validated in declaration order at `build()`; the first failure
/// is returned. A missing name fails like an empty one, and a missing phone
/// number fails the phone rule.
#[derive(Debug, Clone, Default)]
pub struct AuthorBuilder {
    name: Option<String>,
    phone_number: Option<String>,
}

impl AuthorBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone_number(mut self, phone_number: impl Display) -> Self {
        self.phone_number = Some(phone_number.to_string());
        self
    }

    pub fn build(self) -> Result<Author, ValidationError> {
        let name = self.name.unwrap_or_default();
        validate_name(&name)?;
        let phone_number = match self.phone_number {
            Some(value) => validate_phone(value)?,
            None => return Err(ValidationError::InvalidPhoneNumber),
        };

        Ok(Author {
            id: None,
            name,
            phone_number,
            created_at: None,
            updated_at: None,
        })
    }
}

/// Wire shape used to validate deserialized authors.
#[derive(Deserialize)]
struct AuthorFields {
    #[serde(default)]
    id: Option<RecordId>,
    name: Option<String>,
    phone_number: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<AuthorFields> for Author {
    type Error = ValidationError;

    fn try_from(value: AuthorFields) -> Result<Self, Self::Error> {
        let mut builder = Author::builder();
        if let Some(name) = value.name {
            builder = builder.name(name);
        }
        if let Some(phone_number) = value.phone_number {
            builder = builder.phone_number(phone_number);
        }
        let mut author = builder.build()?;
        author.id = value.id;
        author.created_at = value.created_at;
        author.updated_at = value.updated_at;
        Ok(author)
    }
}
