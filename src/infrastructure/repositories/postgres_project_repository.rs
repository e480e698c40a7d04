use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::project::Project;
use crate::domain::repositories::{ProjectRepository, RepositoryError};

/// PostgreSQL implementation of ProjectRepository
///
/// Queries are bound at runtime so the crate builds without a configured
/// database. Identifiers are assigned by the `projects.id` column default.
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project::from_storage(row.id, row.user_id, row.name, row.description, row.created_at)
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, RepositoryError> {
        let row: ProjectRow = sqlx::query_as(
            r#"
            INSERT INTO projects (user_id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, description, created_at
            "#,
        )
        .bind(project.user_id())
        .bind(project.name())
        .bind(project.description())
        .bind(project.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, description, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Project::from))
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Project, RepositoryError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, description, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        let row = row.ok_or(RepositoryError::NotFound(id))?;
        if row.user_id != owner {
            return Err(RepositoryError::Forbidden(id));
        }

        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, description, created_at
            FROM projects
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn update(&self, project: &Project) -> Result<(), RepositoryError> {
        let id = project
            .id()
            .ok_or_else(|| RepositoryError::Database("cannot update an unsaved project".to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(project.name())
        .bind(project.description())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // Idempotent contract: zero rows affected is still success.
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
