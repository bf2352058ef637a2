use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::models::Task;

/// Returns the indices of tasks whose text fuzzy-matches `query`, in list order.
pub fn filter_tasks(tasks: &[Task], query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return (0..tasks.len()).collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| matcher.fuzzy_match(&task.text, query).is_some())
        .map(|(i, _)| i)
        .collect()
}
