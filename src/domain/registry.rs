use std::collections::BTreeMap;
use std::fmt::Display;

/// Component label to `owner/repo` mapping. Components missing from the
/// registry are not reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoRegistry {
    repositories: BTreeMap<String, String>,
}

impl RepoRegistry {
    pub fn new(repositories: BTreeMap<String, String>) -> Self {
        Self { repositories }
    }

    pub fn repository(&self, component: &str) -> Option<&str> {
        self.repositories.get(component).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.repositories
            .iter()
            .map(|(component, repo)| (component.as_str(), repo.as_str()))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for RepoRegistry {
    fn from(entries: [(&str, &str); N]) -> Self {
        Self::new(
            entries
                .into_iter()
                .map(|(component, repo)| (component.to_string(), repo.to_string()))
                .collect(),
        )
    }
}

pub fn pull_request_url(repository: &str, number: impl Display) -> String {
    format!("https://github.com/{repository}/pull/{number}")
}
