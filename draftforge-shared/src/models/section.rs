/// Section model and database operations
///
/// A section is one outline entry of a project: a title, free-text content,
/// and optional review metadata (a reviewer comment and a tri-state "liked"
/// flag). Content moves through three informal states:
///
/// ```text
/// empty ("") → drafted (filled by generation) → refined (rewritten, any
///                                               number of times)
/// ```
///
/// Generation only fills empty sections; refinement always overwrites.
/// Comment and liked are orthogonal metadata, mutated independently of
/// content.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sections (
///     id BIGSERIAL PRIMARY KEY,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     content TEXT NOT NULL DEFAULT '',
///     comment TEXT,
///     liked BOOLEAN,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Section model representing one outline entry / content block
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Section {
    /// Unique section id
    pub id: i64,

    /// Owning project
    pub project_id: i64,

    /// Section title from the outline
    pub title: String,

    /// Free-text content; empty string until drafted
    pub content: String,

    /// Optional reviewer note
    pub comment: Option<String>,

    /// Tri-state approval flag: unset / liked / disliked
    pub liked: Option<bool>,

    /// When the section was created
    pub created_at: DateTime<Utc>,
}

impl Section {
    /// Returns true if the section has no content yet.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Lists a project's sections in creation (outline) order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sections = sqlx::query_as::<_, Section>(
            r#"
            SELECT id, project_id, title, content, comment, liked, created_at
            FROM sections
            WHERE project_id = $1
            ORDER BY id
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(sections)
    }

    /// Finds a section by id, scoped to the owner of its parent project.
    ///
    /// The lookup joins through to the project owner, so a section that
    /// exists but belongs to another user's project is indistinguishable
    /// from a missing one. Every mutating route goes through this.
    pub async fn find_for_user(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let section = sqlx::query_as::<_, Section>(
            r#"
            SELECT s.id, s.project_id, s.title, s.content, s.comment, s.liked, s.created_at
            FROM sections s
            JOIN projects p ON p.id = s.project_id
            WHERE s.id = $1 AND p.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(section)
    }

    /// Overwrites a section's content. Last write wins.
    pub async fn update_content(
        pool: &PgPool,
        id: i64,
        content: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sections SET content = $2 WHERE id = $1")
            .bind(id)
            .bind(content)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets a section's reviewer comment. Content is untouched.
    pub async fn update_comment(
        pool: &PgPool,
        id: i64,
        comment: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sections SET comment = $2 WHERE id = $1")
            .bind(id)
            .bind(comment)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets or clears the tri-state liked flag. Content is untouched.
    pub async fn update_liked(
        pool: &PgPool,
        id: i64,
        liked: Option<bool>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sections SET liked = $2 WHERE id = $1")
            .bind(id)
            .bind(liked)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(content: &str) -> Section {
        Section {
            id: 1,
            project_id: 1,
            title: "Intro".to_string(),
            content: content.to_string(),
            comment: None,
            liked: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_empty() {
        assert!(section("").is_empty());
        assert!(!section("drafted text").is_empty());
        // Whitespace counts as content; generation will not overwrite it.
        assert!(!section(" ").is_empty());
    }
}
