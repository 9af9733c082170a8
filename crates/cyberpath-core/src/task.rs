use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pentest,
    Analysis,
    Incident,
    Forensics,
    Governance,
    Cloud,
    Iot,
    Malware,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Pentest,
        Category::Analysis,
        Category::Incident,
        Category::Forensics,
        Category::Governance,
        Category::Cloud,
        Category::Iot,
        Category::Malware,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Pentest => "pentest",
            Category::Analysis => "analysis",
            Category::Incident => "incident",
            Category::Forensics => "forensics",
            Category::Governance => "governance",
            Category::Cloud => "cloud",
            Category::Iot => "iot",
            Category::Malware => "malware",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Category> {
        let key = raw.trim().to_ascii_lowercase();
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(s).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown category: {s} (expected one of: {})",
                Category::ALL.map(Category::key).join(", ")
            )
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,

    pub text: String,

    pub category: Category,

    #[serde(default)]
    pub completed: bool,

    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(text: String, category: Category, now: DateTime<Utc>, id: u64) -> Self {
        Self {
            id,
            text,
            category,
            completed: false,
            created_at: now,
        }
    }
}

/// Ids come from the creation instant's Unix milliseconds. Rapid successive
/// adds can land on the same millisecond, so the candidate is bumped past any
/// id already present in the list.
#[must_use]
pub fn next_task_id(now: DateTime<Utc>, tasks: &[Task]) -> u64 {
    let mut id = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    while tasks.iter().any(|task| task.id == id) {
        id += 1;
    }
    id
}

/// Illustrative tasks installed on first run, before anything was ever
/// persisted.
#[must_use]
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let samples = [
        ("Read through the OWASP Top 10", Category::Pentest),
        ("Set up a SIEM home lab with two VMs", Category::Analysis),
        ("Walk through a disk image with Autopsy", Category::Forensics),
    ];

    let mut tasks: Vec<Task> = Vec::with_capacity(samples.len());
    for (text, category) in samples {
        let id = next_task_id(now, &tasks);
        // Newest first, matching how add prepends.
        tasks.insert(0, Task::new(text.to_string(), category, now, id));
    }
    tasks
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Category, Task, next_task_id, seed_tasks};

    #[test]
    fn category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.key()), Some(category));
        }
        assert_eq!(Category::parse("PENTEST"), Some(Category::Pentest));
        assert_eq!(Category::parse("devops"), None);
    }

    #[test]
    fn ids_bump_past_collisions() {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid now");
        let first = Task::new(
            "a".to_string(),
            Category::Cloud,
            now,
            next_task_id(now, &[]),
        );
        let second_id = next_task_id(now, std::slice::from_ref(&first));
        assert_eq!(second_id, first.id + 1);
    }

    #[test]
    fn seeds_are_three_fresh_tasks() {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid now");
        let seeds = seed_tasks(now);
        assert_eq!(seeds.len(), 3);
        assert!(seeds.iter().all(|task| !task.completed));

        let mut ids: Vec<u64> = seeds.iter().map(|task| task.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
