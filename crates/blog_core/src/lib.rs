//! Core records and persistence for the blog.
//! Field rules live with the records; uniqueness lives in the store.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorBuilder};
pub use model::post::{Post, PostCategory};
pub use model::validation::ValidationError;
pub use model::RecordId;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::{add_author, AuthorService};
pub use service::post_service::{add_post, PostService};

/// Minimal health-check API for linkage probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
