mod common;

use anyhow::Result;
use tasktrack_api::database::models::ProjectDraft;
use tasktrack_api::services::{ServiceError, TaskFilter};
use tasktrack_api::types::{ProjectId, TaskPriority, TaskStatus};

fn project_not_found(err: &ServiceError) -> bool {
    matches!(err, ServiceError::NotFound(m) if m == "Project not found")
}

#[tokio::test]
async fn create_then_get_round_trips() -> Result<()> {
    let state = common::state();
    common::register(&state, "alice").await?;

    let created = state
        .projects
        .create(
            "alice",
            ProjectDraft {
                name: "Garden".to_string(),
                description: Some("spring planting".to_string()),
            },
        )
        .await?;

    let fetched = state.projects.get("alice", created.id).await?;
    assert_eq!(fetched, created);
    assert_eq!(fetched.description.as_deref(), Some("spring planting"));
    Ok(())
}

#[tokio::test]
async fn list_only_returns_callers_projects() -> Result<()> {
    let state = common::state();
    common::register(&state, "alice").await?;
    common::register(&state, "bob").await?;

    common::project(&state, "alice", "A1").await?;
    common::project(&state, "alice", "A2").await?;
    common::project(&state, "bob", "B1").await?;

    let names: Vec<String> = state.projects.list("alice").await?.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["A1", "A2"]);
    assert_eq!(state.projects.list("bob").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn foreign_and_missing_projects_are_indistinguishable() -> Result<()> {
    let state = common::state();
    common::register(&state, "alice").await?;
    common::register(&state, "bob").await?;
    let alices = common::project(&state, "alice", "private").await?;

    let foreign = state.projects.get("bob", alices.id).await.unwrap_err();
    let missing = state.projects.get("bob", ProjectId(9_999)).await.unwrap_err();
    assert!(project_not_found(&foreign), "{foreign:?}");
    assert!(project_not_found(&missing), "{missing:?}");

    let draft = ProjectDraft {
        name: "hijacked".to_string(),
        description: None,
    };
    assert!(project_not_found(&state.projects.update("bob", alices.id, draft).await.unwrap_err()));
    assert!(project_not_found(&state.projects.delete("bob", alices.id).await.unwrap_err()));

    // untouched
    assert_eq!(state.projects.get("alice", alices.id).await?.name, "private");
    Ok(())
}

#[tokio::test]
async fn update_overwrites_and_bumps_timestamp() -> Result<()> {
    let state = common::state();
    common::register(&state, "alice").await?;
    let created = common::project(&state, "alice", "Old").await?;

    let updated = state
        .projects
        .update(
            "alice",
            created.id,
            ProjectDraft {
                name: "New".to_string(),
                description: Some("renamed".to_string()),
            },
        )
        .await?;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "New");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    Ok(())
}

#[tokio::test]
async fn delete_cascades_to_tasks_and_is_final() -> Result<()> {
    let state = common::state();
    common::register(&state, "alice").await?;
    let project = common::project(&state, "alice", "Doomed").await?;
    let task = state
        .tasks
        .create("alice", project.id, common::task_draft("t", TaskStatus::Todo, TaskPriority::Low))
        .await?;

    state.projects.delete("alice", project.id).await?;

    assert!(project_not_found(&state.projects.get("alice", project.id).await.unwrap_err()));
    assert!(project_not_found(&state.projects.delete("alice", project.id).await.unwrap_err()));
    assert!(project_not_found(
        &state.tasks.get("alice", project.id, task.id).await.unwrap_err()
    ));
    assert!(project_not_found(
        &state.tasks.list("alice", project.id, TaskFilter::default()).await.unwrap_err()
    ));
    Ok(())
}

#[tokio::test]
async fn unknown_identity_is_user_not_found() -> Result<()> {
    let state = common::state();
    let err = state.projects.list("ghost").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(ref m) if m == "User not found"), "{err:?}");
    Ok(())
}
