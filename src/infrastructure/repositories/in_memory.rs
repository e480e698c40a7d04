//! In-memory repository backends.
//!
//! Used by the integration tests to exercise the full HTTP stack without a
//! database. State lives behind an `Arc`, so a registry builder can close
//! over one instance and hand out per-request clones that share storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::project::Project;
use crate::domain::repositories::{
    ProjectRepository, RepositoryError, UserRepository,
};
use crate::domain::user::{Email, User};

/// HashMap-backed ProjectRepository
#[derive(Clone, Default)]
pub struct InMemoryProjectRepository {
    store: Arc<Mutex<HashMap<Uuid, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, RepositoryError> {
        // The store assigns the identifier, mirroring the column default.
        let id = Uuid::new_v4();
        let persisted = Project::from_storage(
            id,
            project.user_id(),
            project.name().to_string(),
            project.description().map(str::to_string),
            project.created_at(),
        );

        self.store.lock().unwrap().insert(id, persisted.clone());

        Ok(persisted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        Ok(self.store.lock().unwrap().get(&id).cloned())
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Project, RepositoryError> {
        let store = self.store.lock().unwrap();
        let project = store.get(&id).ok_or(RepositoryError::NotFound(id))?;

        if project.user_id() != owner {
            return Err(RepositoryError::Forbidden(id));
        }

        Ok(project.clone())
    }

    async fn find_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let mut projects: Vec<Project> = self.store.lock().unwrap().values().cloned().collect();
        projects.sort_by_key(Project::created_at);
        Ok(projects)
    }

    async fn update(&self, project: &Project) -> Result<(), RepositoryError> {
        let id = project
            .id()
            .ok_or_else(|| RepositoryError::Database("cannot update an unsaved project".to_string()))?;

        let mut store = self.store.lock().unwrap();
        if !store.contains_key(&id) {
            return Err(RepositoryError::NotFound(id));
        }
        store.insert(id, project.clone());

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// HashMap-backed UserRepository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    store: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, RepositoryError> {
        let mut store = self.store.lock().unwrap();

        if store.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::Conflict);
        }

        let id = user.id;
        store.insert(id, user);

        Ok(id)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ProjectDto;

    fn new_project(owner: Uuid, name: &str) -> Project {
        Project::from_dto(&ProjectDto {
            id: None,
            user_id: Some(owner),
            name: name.to_string(),
            description: None,
        })
        .expect("valid project")
    }

    #[tokio::test]
    async fn create_assigns_id() {
        let repo = InMemoryProjectRepository::new();
        let created = repo
            .create(new_project(Uuid::new_v4(), "x"))
            .await
            .expect("create");

        assert!(created.id().is_some());
    }

    #[tokio::test]
    async fn find_owned_rejects_foreign_owner() {
        let repo = InMemoryProjectRepository::new();
        let owner = Uuid::new_v4();
        let created = repo.create(new_project(owner, "x")).await.expect("create");
        let id = created.id().unwrap();

        assert!(repo.find_owned(id, owner).await.is_ok());
        assert!(matches!(
            repo.find_owned(id, Uuid::new_v4()).await,
            Err(RepositoryError::Forbidden(_))
        ));
        assert!(matches!(
            repo.find_owned(Uuid::new_v4(), owner).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_missing_id_is_ok() {
        let repo = InMemoryProjectRepository::new();
        assert!(repo.delete(Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        let email = Email::parse("dup@example.com").unwrap();

        let user = User {
            id: Uuid::new_v4(),
            email: email.clone(),
            password_hash: "hash".to_string(),
            name: "First".to_string(),
            created_at: chrono::Utc::now(),
        };
        repo.create(user.clone()).await.expect("first create");

        let second = User {
            id: Uuid::new_v4(),
            ..user
        };
        assert!(matches!(
            repo.create(second).await,
            Err(RepositoryError::Conflict)
        ));
    }
}
