use crate::models::{Priority, Summary, Task, TaskId};

/// In-memory task list plus the pending input for the next task.
///
/// Every edit builds a new task vector and swaps it in, so a slice handed
/// out by [`TaskBoard::tasks`] always reflects one complete snapshot.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    input: String,
    pending_priority: Priority,
}

impl TaskBoard {
    pub fn new(default_priority: Priority) -> Self {
        TaskBoard {
            tasks: Vec::new(),
            input: String::new(),
            pending_priority: default_priority,
        }
    }

    /// Board holding the fixed initial task set.
    pub fn seeded(default_priority: Priority) -> Self {
        let mut board = Self::new(default_priority);
        board.tasks = seed_tasks();
        board
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pending_priority(&self) -> Priority {
        self.pending_priority
    }

    pub fn set_pending_priority(&mut self, priority: Priority) {
        self.pending_priority = priority;
    }

    pub fn cycle_pending_priority(&mut self) {
        self.pending_priority = self.pending_priority.next();
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Appends a task built from `text`. Blank text is ignored.
    pub fn add(&mut self, text: &str, priority: Priority) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            log::debug!("ignoring blank task text");
            return None;
        }

        let task = Task::new(text, priority);
        let id = task.id;
        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.extend(self.tasks.iter().cloned());
        next.push(task);
        self.tasks = next;
        self.input.clear();

        log::info!("added task {} [{}]", id, priority);
        Some(id)
    }

    /// Adds the pending input with the pending priority.
    pub fn submit(&mut self) -> Option<TaskId> {
        let text = std::mem::take(&mut self.input);
        let added = self.add(&text, self.pending_priority);
        if added.is_none() {
            // blank submit leaves the buffer as typed
            self.input = text;
        }
        added
    }

    pub fn toggle_complete(&mut self, id: TaskId) {
        if self.get(id).is_none() {
            log::debug!("toggle: no task {}", id);
            return;
        }

        self.tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    Task {
                        completed: !task.completed,
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();

        log::info!("toggled task {}", id);
    }

    pub fn delete(&mut self, id: TaskId) {
        if self.get(id).is_none() {
            log::debug!("delete: no task {}", id);
            return;
        }

        self.tasks = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();

        log::info!("deleted task {}", id);
    }

    pub fn summary(&self) -> Summary {
        Summary {
            completed: self.tasks.iter().filter(|task| task.completed).count(),
            total: self.tasks.len(),
        }
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::seeded(Priority::default())
    }
}

fn seed_tasks() -> Vec<Task> {
    let mut review = Task::new("Review pull requests for the feed redesign", Priority::Medium)
        .with_assignee("Sarah Chen", "https://i.pravatar.cc/150?img=47");
    review.completed = true;

    vec![
        Task::new("Fix image loading on slow connections", Priority::High)
            .with_assignee("Alex Rivera", "https://i.pravatar.cc/150?img=12"),
        review,
        Task::new("Update onboarding copy", Priority::Low),
    ]
}
