/// Project model and database operations
///
/// A project is one authored document: a title, a target export format, and
/// an ordered collection of sections created from the outline supplied at
/// creation time.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE doc_type AS ENUM ('docx', 'pptx');
///
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     title TEXT NOT NULL,
///     doc_type doc_type NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use draftforge_shared::models::project::{CreateProject, DocType, Project};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let project = Project::create_with_outline(&pool, CreateProject {
///     user_id: 1,
///     title: "Quarterly Report".to_string(),
///     doc_type: DocType::Docx,
///     outline: vec!["Intro".to_string(), "Body".to_string()],
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Target export format of a project
///
/// Restricted to the two supported office document formats. The variant
/// name doubles as the export file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "doc_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Word document
    Docx,

    /// PowerPoint slide deck
    Pptx,
}

impl DocType {
    /// Returns the format as a string, which is also the file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Docx => "docx",
            DocType::Pptx => "pptx",
        }
    }
}

/// Project model representing one authored document
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project id
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Document title, also used (sanitized) in the export file name
    pub title: String,

    /// Target export format
    pub doc_type: DocType,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project with its outline
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Owning user
    pub user_id: i64,

    /// Document title
    pub title: String,

    /// Target export format
    pub doc_type: DocType,

    /// Ordered list of section titles; one empty section is created per entry
    pub outline: Vec<String>,
}

impl Project {
    /// Creates a project and its outline sections in one transaction.
    ///
    /// The project row and one section row per outline entry (in outline
    /// order, with empty content) commit together: if any insert fails, the
    /// whole creation rolls back and no partial project remains.
    ///
    /// # Errors
    ///
    /// Returns a database error if any insert fails; nothing is persisted in
    /// that case.
    pub async fn create_with_outline(
        pool: &PgPool,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (user_id, title, doc_type)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, doc_type, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(&data.title)
        .bind(data.doc_type)
        .fetch_one(&mut *tx)
        .await?;

        // Sequential inserts keep the BIGSERIAL ids in outline order, which
        // is the section ordering contract.
        for section_title in &data.outline {
            sqlx::query(
                r#"
                INSERT INTO sections (project_id, title, content)
                VALUES ($1, $2, '')
                "#,
            )
            .bind(project.id)
            .bind(section_title)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(project)
    }

    /// Finds a project by id, scoped to its owner.
    ///
    /// Returns `None` both when the project does not exist and when it
    /// belongs to a different user, so callers cannot distinguish the two;
    /// non-owners learn nothing about foreign project ids.
    pub async fn find_for_user(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, user_id, title, doc_type, created_at
            FROM projects
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project; its sections go with it via the FK cascade.
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_type_as_str() {
        assert_eq!(DocType::Docx.as_str(), "docx");
        assert_eq!(DocType::Pptx.as_str(), "pptx");
    }

    #[test]
    fn test_doc_type_serde() {
        assert_eq!(serde_json::to_string(&DocType::Docx).unwrap(), "\"docx\"");
        assert_eq!(serde_json::to_string(&DocType::Pptx).unwrap(), "\"pptx\"");

        let parsed: DocType = serde_json::from_str("\"pptx\"").unwrap();
        assert_eq!(parsed, DocType::Pptx);

        assert!(serde_json::from_str::<DocType>("\"pdf\"").is_err());
    }
}
