use anyhow::Context;
use regex::Regex;
use tracing::trace;

use crate::task::{Category, Task};

/// One filter term. Terms combine conjunctively.
#[derive(Debug, Clone)]
pub enum Pred {
    Id(u64),
    CategoryEq(Category),
    Completed,
    Active,
    TextRegex(Regex),
    TextContains(String),
}

#[derive(Debug, Clone, Default)]
pub struct Filter {
    preds: Vec<Pred>,
}

impl Filter {
    /// Terms: a numeric id, a category key, `completed`/`done`,
    /// `active`/`pending`, a `/regex/`, or a plain case-insensitive
    /// substring of the task text.
    pub fn parse(terms: &[String]) -> anyhow::Result<Self> {
        let mut preds = Vec::with_capacity(terms.len());

        for term in terms {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }

            let pred = if let Ok(id) = term.parse::<u64>() {
                Pred::Id(id)
            } else if let Some(category) = Category::parse(term) {
                Pred::CategoryEq(category)
            } else if matches!(term.to_ascii_lowercase().as_str(), "completed" | "done") {
                Pred::Completed
            } else if matches!(term.to_ascii_lowercase().as_str(), "active" | "pending") {
                Pred::Active
            } else if let Some(pattern) = term
                .strip_prefix('/')
                .and_then(|rest| rest.strip_suffix('/'))
                .filter(|pattern| !pattern.is_empty())
            {
                let regex = Regex::new(&format!("(?i){pattern}"))
                    .with_context(|| format!("invalid filter regex: /{pattern}/"))?;
                Pred::TextRegex(regex)
            } else {
                Pred::TextContains(term.to_lowercase())
            };

            trace!(term, ?pred, "parsed filter term");
            preds.push(pred);
        }

        Ok(Self { preds })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.preds.is_empty()
    }

    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.preds.iter().all(|pred| match pred {
            Pred::Id(id) => task.id == *id,
            Pred::CategoryEq(category) => task.category == *category,
            Pred::Completed => task.completed,
            Pred::Active => !task.completed,
            Pred::TextRegex(regex) => regex.is_match(&task.text),
            Pred::TextContains(needle) => task.text.to_lowercase().contains(needle),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::Filter;
    use crate::task::{Category, Task};

    fn sample_tasks() -> Vec<Task> {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid now");
        let mut nmap = Task::new("Scan the lab with Nmap".to_string(), Category::Pentest, now, 1);
        nmap.completed = true;
        vec![
            nmap,
            Task::new("Read SIEM alert runbooks".to_string(), Category::Analysis, now, 2),
            Task::new("Carve files from a disk image".to_string(), Category::Forensics, now, 3),
        ]
    }

    #[test]
    fn category_and_status_terms_conjoin() {
        let tasks = sample_tasks();
        let filter =
            Filter::parse(&["pentest".to_string(), "completed".to_string()]).expect("parse");
        let matched: Vec<u64> = tasks
            .iter()
            .filter(|task| filter.matches(task))
            .map(|task| task.id)
            .collect();
        assert_eq!(matched, vec![1]);
    }

    #[test]
    fn regex_and_substring_terms_match_text() {
        let tasks = sample_tasks();

        let regex = Filter::parse(&["/si[ae]m/".to_string()]).expect("parse regex");
        assert!(regex.matches(&tasks[1]));
        assert!(!regex.matches(&tasks[0]));

        let substring = Filter::parse(&["DISK".to_string()]).expect("parse substring");
        assert!(substring.matches(&tasks[2]));
    }

    #[test]
    fn invalid_regex_is_an_error() {
        assert!(Filter::parse(&["/[unclosed/".to_string()]).is_err());
    }

    #[test]
    fn empty_filter_matches_everything() {
        let tasks = sample_tasks();
        let filter = Filter::parse(&[]).expect("parse");
        assert!(filter.is_empty());
        assert!(tasks.iter().all(|task| filter.matches(task)));
    }
}
