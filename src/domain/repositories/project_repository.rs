use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::project::Project;

/// Repository trait for the Project entity
///
/// One instance is constructed per request through the registry; nothing is
/// shared across requests beyond the underlying connection handle.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a new project. The identifier is assigned by the store and
    /// returned on the persisted copy.
    async fn create(&self, project: Project) -> Result<Project, RepositoryError>;

    /// Find a project by its ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;

    /// Fetch a project by ID, requiring it to belong to `owner`.
    ///
    /// Fails with `NotFound` when absent and `Forbidden` when it exists
    /// under another owner; no mutation happens in either case.
    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Project, RepositoryError>;

    /// All projects, ordered by creation time.
    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError>;

    /// Persist field changes to an existing project.
    async fn update(&self, project: &Project) -> Result<(), RepositoryError>;

    /// Delete a project by ID. Deleting an absent ID is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
