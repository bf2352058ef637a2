use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        TaskId(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Cycles low -> medium -> high -> low.
    pub fn next(&self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(anyhow::anyhow!(
                "invalid priority '{}': expected low, medium or high",
                other
            )),
        }
    }
}

/// Display-only reference to a person. The avatar locator is resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignee {
    pub name: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub assignee: Option<Assignee>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Task {
            id: TaskId::new(),
            text: text.into(),
            completed: false,
            priority,
            assignee: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_assignee(mut self, name: &str, avatar_url: &str) -> Self {
        self.assignee = Some(Assignee {
            name: name.to_string(),
            avatar_url: avatar_url.to_string(),
        });
        self
    }

    pub fn accent(&self) -> Accent {
        if self.completed {
            return Accent::Done;
        }
        match self.priority {
            Priority::High => Accent::High,
            Priority::Medium => Accent::Medium,
            Priority::Low => Accent::Low,
        }
    }
}

/// Visual accent of a task row. `Done` overrides the priority accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    High,
    Medium,
    Low,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub completed: usize,
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} done", self.completed, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    NewTask,
    Filter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_follows_priority_until_done() {
        let mut task = Task::new("ship it", Priority::High);
        assert_eq!(task.accent(), Accent::High);

        task.completed = true;
        assert_eq!(task.accent(), Accent::Done);

        let low = Task::new("later", Priority::Low);
        assert_eq!(low.accent(), Accent::Low);
    }

    #[test]
    fn test_task_ids_are_unique() {
        let a = Task::new("a", Priority::Low);
        let b = Task::new("a", Priority::Low);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_priority_parse_and_cycle() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());

        assert_eq!(Priority::Low.next(), Priority::Medium);
        assert_eq!(Priority::High.next(), Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary { completed: 1, total: 3 };
        assert_eq!(summary.to_string(), "1/3 done");
    }
}
