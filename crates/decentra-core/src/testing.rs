//! Test fixtures shared by unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{AccountId, Difficulty, Task, TaskId, TaskPriority, TaskStatus};

/// 2024-01-{day} {hour}:00:00 UTC
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

pub fn id(n: u32) -> TaskId {
    TaskId::new(n).unwrap()
}

/// Minimal task created by alice on Jan 1st.
pub fn task(n: u32, difficulty: u8, reward: u64) -> Task {
    Task::new(id(n), format!("Task {n}"), AccountId::new("alice"), at(1, 0))
        .with_difficulty(Difficulty::new(difficulty).unwrap())
        .with_reward(reward)
}

/// Five tasks resembling the board's demo data.
///
/// | id | priority | diff | reward | creator | assignee | deadline | status     |
/// |----|----------|------|--------|---------|----------|----------|------------|
/// | 1  | High     | 7    | 500    | alice   | bob      | Jan 8    | Pending    |
/// | 2  | Medium   | 6    | 400    | bob     | charlie  | Jan 6    | InProgress |
/// | 3  | Low      | 4    | 200    | alice   | -        | -        | Pending    |
/// | 4  | Urgent   | 8    | 600    | charlie | -        | Jan 4    | Pending    |
/// | 5  | Medium   | 5    | 300    | bob     | -        | -        | Pending    |
///
/// Task n is created at Jan 1 n:00.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(id(1), "Frontend React Development", "alice".into(), at(1, 1))
            .with_description("Build modern React components with TypeScript")
            .with_priority(TaskPriority::High)
            .with_difficulty(Difficulty::new(7).unwrap())
            .with_reward(500)
            .with_deadline(at(8, 0))
            .with_assignee("bob".into())
            .with_updated_at(at(2, 0)),
        Task::new(id(2), "Backend API Development", "bob".into(), at(1, 2))
            .with_description("Create REST API endpoints for React frontend")
            .with_status(TaskStatus::InProgress)
            .with_priority(TaskPriority::Medium)
            .with_difficulty(Difficulty::new(6).unwrap())
            .with_reward(400)
            .with_deadline(at(6, 0))
            .with_assignee("charlie".into())
            .with_updated_at(at(1, 5)),
        Task::new(id(3), "Database Schema Design", "alice".into(), at(1, 3))
            .with_description("Design PostgreSQL schema for the application")
            .with_priority(TaskPriority::Low)
            .with_difficulty(Difficulty::new(4).unwrap())
            .with_reward(200),
        Task::new(id(4), "Mobile App Development", "charlie".into(), at(1, 4))
            .with_description("Create React Native mobile application")
            .with_priority(TaskPriority::Urgent)
            .with_difficulty(Difficulty::new(8).unwrap())
            .with_reward(600)
            .with_deadline(at(4, 0)),
        Task::new(id(5), "UI/UX Design", "bob".into(), at(1, 5))
            .with_description("Design user interface mockups and prototypes")
            .with_priority(TaskPriority::Medium)
            .with_difficulty(Difficulty::new(5).unwrap())
            .with_reward(300),
    ]
}
