//! Post use-case service.
//!
//! # Responsibility
//! - Provide stable create/update/get entry points for posts.
//! - Delegate persistence to a `PostRepository`.

use crate::model::post::Post;
use crate::model::RecordId;
use crate::repo::post_repo::{PostRepository, SqlitePostRepository};
use crate::repo::RepoResult;
use crate::service::log_write_failure;
use log::info;
use rusqlite::Connection;

/// Builds a post and stores it on `conn` in one transaction.
pub fn add_post(
    conn: &mut Connection,
    title: &str,
    content: &str,
    summary: &str,
    category: &str,
) -> RepoResult<Post> {
    let post = Post::new(title, content, summary, category)?;
    let repo = SqlitePostRepository::try_new(conn)?;
    PostService::new(repo).create_post(&post)
}

/// Use-case service wrapper for post persistence.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_post(&mut self, post: &Post) -> RepoResult<Post> {
        match self.repo.create_post(post) {
            Ok(stored) => {
                info!(
                    "event=post_add module=service status=ok post_id={} category={}",
                    stored.id().unwrap_or_default(),
                    stored.category()
                );
                Ok(stored)
            }
            Err(err) => {
                log_write_failure("post_add", &err);
                Err(err)
            }
        }
    }

    pub fn update_post(&mut self, post: &Post) -> RepoResult<Post> {
        match self.repo.update_post(post) {
            Ok(stored) => {
                info!(
                    "event=post_update module=service status=ok post_id={}",
                    stored.id().unwrap_or_default()
                );
                Ok(stored)
            }
            Err(err) => {
                log_write_failure("post_update", &err);
                Err(err)
            }
        }
    }

    pub fn get_post(&self, id: RecordId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }
}
