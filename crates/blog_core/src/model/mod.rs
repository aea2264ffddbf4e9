//! Blog domain records and their field validators.
//!
//! # Responsibility
//! - Define the `Author` and `Post` records stored by the repositories.
//! - Keep shape rules next to the records that own them.
//!
//! # Invariants
//! - Every field assignment on a record runs exactly one validator.
//! - Store-owned fields (`id`, timestamps) are only set by `repo`.

use std::fmt::{Display, Formatter};

pub mod author;
pub mod post;
pub mod validation;

/// Store-assigned integer primary key.
pub type RecordId = i64;

/// Renders an optional id as `None` or its number.
pub(crate) struct DisplayId(pub(crate) Option<RecordId>);

impl Display for DisplayId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("None"),
        }
    }
}
