//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw field input into validated records and persist them.
//! - Report every write outcome explicitly and log it.

use crate::repo::RepoError;
use log::{error, warn};

pub mod author_service;
pub mod post_service;

/// Logs a failed write for `event` at the level its error kind deserves.
///
/// Rejections (validation, duplicates, missing rows) are `warn`; store
/// failures are `error`.
pub(crate) fn log_write_failure(event: &str, err: &RepoError) {
    let error_code = write_failure_code(err);
    match err {
        RepoError::DuplicateName(_) => warn!(
            "event={event} module=service status=duplicate error_code={error_code}"
        ),
        RepoError::Validation(_) | RepoError::Unsaved => warn!(
            "event={event} module=service status=rejected error_code={error_code}"
        ),
        RepoError::NotFound(id) => warn!(
            "event={event} module=service status=rejected error_code={error_code} record_id={id}"
        ),
        other => error!(
            "event={event} module=service status=error error_code={error_code} error={other}"
        ),
    }
}

fn write_failure_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::DuplicateName(_) => "unique_violation",
        RepoError::Validation(_) => "validation_failed",
        RepoError::NotFound(_) => "not_found",
        RepoError::Unsaved => "unsaved_record",
        _ => "store_failed",
    }
}

#[cfg(test)]
mod tests {
    use super::write_failure_code;
    use crate::model::validation::ValidationError;
    use crate::repo::RepoError;

    #[test]
    fn rejections_and_store_failures_get_distinct_codes() {
        assert_eq!(
            write_failure_code(&RepoError::DuplicateName("Ada".to_string())),
            "unique_violation"
        );
        assert_eq!(
            write_failure_code(&RepoError::Validation(ValidationError::InvalidPhoneNumber)),
            "validation_failed"
        );
        assert_eq!(write_failure_code(&RepoError::NotFound(7)), "not_found");
        assert_eq!(write_failure_code(&RepoError::Unsaved), "unsaved_record");
        assert_eq!(
            write_failure_code(&RepoError::InvalidData("bad row".to_string())),
            "store_failed"
        );
    }
}
