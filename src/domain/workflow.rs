use std::collections::BTreeSet;

/// Decides which workflow statuses count as "in progress".
///
/// Workflow vocabularies differ between teams, so the progress analyzer
/// never matches status names itself.
pub trait InProgressPolicy {
    fn is_in_progress(&self, status: &str) -> bool;
}

impl<F> InProgressPolicy for F
where
    F: Fn(&str) -> bool,
{
    fn is_in_progress(&self, status: &str) -> bool {
        self(status)
    }
}

/// Case-insensitive set of in-progress status names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSet {
    statuses: BTreeSet<String>,
}

impl StatusSet {
    pub fn new<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            statuses: statuses
                .into_iter()
                .map(|status| normalize(status.as_ref()))
                .filter(|status| !status.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl InProgressPolicy for StatusSet {
    fn is_in_progress(&self, status: &str) -> bool {
        self.statuses.contains(&normalize(status))
    }
}

fn normalize(status: &str) -> String {
    status.trim().to_lowercase()
}
