//! Source checkout coordinates and links to test sources

use crate::backlog::IssueLinks;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_TEMPLATE: &str = "%{base}/%{git.org}/%{git.repository}/blob/%{git.branch}/%{fileName}";

/// Git coordinates of a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitCoordinates {
    /// Organization (or user) owning the repository
    #[serde(alias = "Organization")]
    pub organization: String,
    /// Repository name
    #[serde(alias = "Repository")]
    pub repository: String,
    /// Branch the checkout was taken from
    #[serde(alias = "Branch")]
    pub branch: String,
}

impl GitCoordinates {
    /// Whether organization, repository and branch are all set
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.organization.is_empty() && !self.repository.is_empty() && !self.branch.is_empty()
    }
}

/// Where a scanned source tree lives, locally and remotely
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCoordinates {
    /// Local checkout root
    pub local: PathBuf,
    /// Remote coordinates
    pub git: GitCoordinates,
    /// Custom source link template
    pub url_template: Option<String>,
}

impl SourceCoordinates {
    /// Local-only coordinates
    #[must_use]
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            local: path.into(),
            ..Self::default()
        }
    }

    /// Name used in log lines
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.git.organization.is_empty() {
            self.local.display().to_string()
        } else {
            format!("{}/{}", self.git.organization, self.git.repository)
        }
    }
}

/// Link to `file_path` in the source repository
///
/// Returns `None` when the GitHub base URL or any git coordinate is missing.
/// The template placeholders are `%{base}`, `%{git.org}`,
/// `%{git.repository}`, `%{git.branch}` and `%{fileName}`.
#[must_use]
pub fn source_url(links: &IssueLinks, coords: &SourceCoordinates, file_path: &str) -> Option<String> {
    if links.github_base_url.is_empty() || !coords.git.is_complete() {
        return None;
    }

    let base = links.github_base_url.strip_suffix('/').unwrap_or(links.github_base_url.as_str());

    let local = coords.local.to_string_lossy();
    let mut file_name = file_path.strip_prefix(&*local).unwrap_or(file_path);
    file_name = file_name.strip_prefix('/').unwrap_or(file_name);

    let template = coords.url_template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    Some(
        template
            .replace("%{base}", base)
            .replace("%{git.org}", &coords.git.organization)
            .replace("%{git.repository}", &coords.git.repository)
            .replace("%{git.branch}", &coords.git.branch)
            .replace("%{fileName}", file_name),
    )
}
