mod common;

use anyhow::Result;
use tasktrack_api::api::TaskResponse;
use tasktrack_api::database::models::TaskDraft;
use tasktrack_api::services::{ServiceError, TaskSearch};
use tasktrack_api::state::AppState;
use tasktrack_api::types::{TaskPriority, TaskStatus};

async fn add(state: &AppState, owner: &str, project: &str, rows: &[(&str, Option<&str>, TaskStatus)]) -> Result<()> {
    let project = common::project(state, owner, project).await?;
    for (title, description, status) in rows {
        let draft = TaskDraft {
            title: title.to_string(),
            description: description.map(str::to_string),
            status: *status,
            priority: TaskPriority::Medium,
            due_date: None,
        };
        state.tasks.create(owner, project.id, draft).await?;
    }
    Ok(())
}

/// alice owns two projects, bob owns one; every title or description below
/// mentions "report" in some casing except the explicit misses
async fn seeded(state: &AppState) -> Result<()> {
    common::register(state, "alice").await?;
    common::register(state, "bob").await?;

    add(
        state,
        "alice",
        "Work",
        &[
            ("Quarterly REPORT", None, TaskStatus::Todo),
            ("Email Dana", Some("send the report draft"), TaskStatus::Done),
            ("Lunch", Some("sandwiches"), TaskStatus::Todo),
        ],
    )
    .await?;
    add(
        state,
        "alice",
        "Home",
        &[
            ("Tax reporting", None, TaskStatus::InProgress),
            ("100% done_ish", Some("literal metacharacters"), TaskStatus::Done),
        ],
    )
    .await?;
    add(state, "bob", "Bob's", &[("bob's report", None, TaskStatus::Todo)]).await?;
    Ok(())
}

fn search(query: &str) -> TaskSearch {
    TaskSearch {
        query: query.to_string(),
        ..Default::default()
    }
}

async fn run(state: &AppState, search: TaskSearch) -> Result<Vec<TaskResponse>> {
    Ok(state.tasks.search("alice", search).await?)
}

#[tokio::test]
async fn matches_title_or_description_case_insensitively() -> Result<()> {
    let state = common::state();
    seeded(&state).await?;

    let tasks = run(&state, search("report")).await?;
    assert_eq!(
        common::titles(&tasks),
        vec!["Quarterly REPORT", "Email Dana", "Tax reporting"]
    );
    Ok(())
}

#[tokio::test]
async fn spans_projects_but_never_other_users() -> Result<()> {
    let state = common::state();
    seeded(&state).await?;

    let alices = run(&state, search("REPORT")).await?;
    assert!(alices.iter().all(|t| !t.title.starts_with("bob")));
    let projects: std::collections::BTreeSet<_> = alices.iter().map(|t| t.project_id).collect();
    assert_eq!(projects.len(), 2);

    let bobs = state.tasks.search("bob", search("report")).await?;
    assert_eq!(common::titles(&bobs), vec!["bob's report"]);
    Ok(())
}

#[tokio::test]
async fn empty_query_matches_every_owned_task() -> Result<()> {
    let state = common::state();
    seeded(&state).await?;
    assert_eq!(run(&state, search("")).await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn like_metacharacters_match_literally() -> Result<()> {
    let state = common::state();
    seeded(&state).await?;

    assert_eq!(common::titles(&run(&state, search("100%")).await?), vec!["100% done_ish"]);
    assert_eq!(common::titles(&run(&state, search("e_i")).await?), vec!["100% done_ish"]);
    assert!(run(&state, search("%")).await?.len() == 1);
    assert!(run(&state, search("r_port")).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn status_is_ignored_by_default() -> Result<()> {
    let state = common::state();
    seeded(&state).await?;

    let filtered = TaskSearch {
        query: "report".to_string(),
        status: Some(TaskStatus::Done),
        priority: Some(TaskPriority::High),
        sort_by: None,
    };
    assert_eq!(run(&state, filtered).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn combine_flag_applies_status_and_priority() -> Result<()> {
    let mut config = common::test_config();
    config.query.combine_search_filters = true;
    let state = common::state_with(config);
    seeded(&state).await?;

    let done = TaskSearch {
        query: "report".to_string(),
        status: Some(TaskStatus::Done),
        ..Default::default()
    };
    assert_eq!(common::titles(&run(&state, done).await?), vec!["Email Dana"]);

    let high = TaskSearch {
        query: "report".to_string(),
        priority: Some(TaskPriority::High),
        ..Default::default()
    };
    assert!(run(&state, high).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn sorted_search() -> Result<()> {
    let state = common::state();
    seeded(&state).await?;

    let by_title = TaskSearch {
        query: "report".to_string(),
        sort_by: Some("title".to_string()),
        ..Default::default()
    };
    assert_eq!(
        common::titles(&run(&state, by_title).await?),
        vec!["Email Dana", "Quarterly REPORT", "Tax reporting"]
    );

    let by_status = TaskSearch {
        query: "report".to_string(),
        sort_by: Some("status".to_string()),
        ..Default::default()
    };
    assert_eq!(
        common::titles(&run(&state, by_status).await?),
        vec!["Quarterly REPORT", "Tax reporting", "Email Dana"]
    );

    let bad = TaskSearch {
        query: "report".to_string(),
        sort_by: Some("owner".to_string()),
        ..Default::default()
    };
    assert!(matches!(run_err(&state, bad).await, ServiceError::InvalidInput(_)));
    Ok(())
}

async fn run_err(state: &AppState, search: TaskSearch) -> ServiceError {
    match state.tasks.search("alice", search).await {
        Ok(tasks) => panic!("expected an error, got {} tasks", tasks.len()),
        Err(err) => err,
    }
}

#[tokio::test]
async fn case_folding_is_per_character() -> Result<()> {
    let state = common::state();
    common::register(&state, "alice").await?;
    add(
        &state,
        "alice",
        "Travel",
        &[
            ("ΟΔΟΣ Ερμού", None, TaskStatus::Todo),
            ("Flights", Some("İSTANBUL layover"), TaskStatus::Todo),
        ],
    )
    .await?;

    for query in ["Σ", "οδοσ", "ΟΔΟΣ"] {
        assert_eq!(common::titles(&run(&state, search(query)).await?), vec!["ΟΔΟΣ Ερμού"], "query={query}");
    }
    assert_eq!(common::titles(&run(&state, search("istanbul")).await?), vec!["Flights"]);
    assert_eq!(common::titles(&run(&state, search("İstanbul")).await?), vec!["Flights"]);
    Ok(())
}
