use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire projection of a project.
///
/// `id` is server-assigned and ignored on create. `user_id` carries the
/// owner in responses; on requests it is overwritten from the authenticated
/// caller before any entity is built, so client-supplied ownership claims
/// never reach persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Project entity
///
/// Owned by exactly one user. `id` stays `None` until the persistence layer
/// assigns it.
///
/// # Invariants
/// - Name cannot be empty
/// - The owner never changes after creation; `apply` only touches the
///   mutable domain fields
#[derive(Debug, Clone)]
pub struct Project {
    id: Option<Uuid>,
    user_id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl Project {
    /// Builds a new, not-yet-persisted project from a DTO.
    ///
    /// The DTO's owner must already be set (handlers stamp it from the
    /// authenticated caller). Any client-supplied `id` is discarded.
    pub fn from_dto(dto: &ProjectDto) -> Result<Self, String> {
        let user_id = dto.user_id.ok_or("project owner is not set")?;

        if dto.name.trim().is_empty() {
            return Err("Project name cannot be empty".to_string());
        }

        Ok(Self {
            id: None,
            user_id,
            name: dto.name.clone(),
            description: dto.description.clone(),
            created_at: Utc::now(),
        })
    }

    /// Rehydrates a persisted project.
    pub fn from_storage(
        id: Uuid,
        user_id: Uuid,
        name: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            user_id,
            name,
            description,
            created_at,
        }
    }

    /// Field-level update from a DTO. Identifier and owner are untouched.
    pub fn apply(&mut self, dto: &ProjectDto) -> Result<(), String> {
        if dto.name.trim().is_empty() {
            return Err("Project name cannot be empty".to_string());
        }

        self.name = dto.name.clone();
        self.description = dto.description.clone();

        Ok(())
    }

    pub fn to_dto(&self) -> ProjectDto {
        ProjectDto {
            id: self.id,
            user_id: Some(self.user_id),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(owner: Option<Uuid>, name: &str) -> ProjectDto {
        ProjectDto {
            id: None,
            user_id: owner,
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn new_project_has_no_id() {
        let project = Project::from_dto(&dto(Some(Uuid::new_v4()), "x")).expect("valid project");
        assert!(project.id().is_none());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(Project::from_dto(&dto(Some(Uuid::new_v4()), "  ")).is_err());
    }

    #[test]
    fn missing_owner_rejected() {
        assert!(Project::from_dto(&dto(None, "x")).is_err());
    }

    #[test]
    fn apply_keeps_id_and_owner() {
        let owner = Uuid::new_v4();
        let mut project =
            Project::from_storage(Uuid::new_v4(), owner, "before".to_string(), None, Utc::now());
        let id = project.id();

        let mut update = dto(Some(Uuid::new_v4()), "after");
        update.description = Some("notes".to_string());
        project.apply(&update).expect("valid update");

        assert_eq!(project.id(), id);
        assert_eq!(project.user_id(), owner);
        assert_eq!(project.name(), "after");
        assert_eq!(project.description(), Some("notes"));
    }

    #[test]
    fn apply_rejects_empty_name() {
        let mut project = Project::from_storage(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "before".to_string(),
            None,
            Utc::now(),
        );

        assert!(project.apply(&dto(None, "")).is_err());
        assert_eq!(project.name(), "before");
    }
}
