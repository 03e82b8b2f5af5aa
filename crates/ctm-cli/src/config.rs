//! JSON run configuration
//!
//! ```json
//! {
//!   "github": {"base_url": "https://github.com", "createLinksInBacklogItems": false},
//!   "jira": {"base_url": "https://jira.example"},
//!   "sourcecode": [{"local": "./src", "language": "java"}],
//!   "testReport": [{"type": "xunit-xml", "local": "./reports"}],
//!   "workDir": "./work",
//!   "outputDir": "./out"
//! }
//! ```

use crate::error::ConfigError;
use ctm_mapping::{parse_backlog_references, BacklogReference, GitCoordinates, IssueLinks, Language, SourceCoordinates};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `github.access_token`
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// GitHub tracker settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// API token; `GITHUB_TOKEN` takes precedence
    pub access_token: String,
    /// Web base URL used for issue and source links
    pub base_url: String,
    /// Whether backlog items should be linked to their results
    #[serde(rename = "createLinksInBacklogItems")]
    pub create_links: bool,
}

/// Jira tracker settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Web base URL used for issue links
    pub base_url: String,
    /// Whether backlog items should be linked to their results
    #[serde(rename = "createLinksInBacklogItems")]
    pub create_links: bool,
}

/// One source checkout to scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Local checkout root
    #[serde(default)]
    pub local: PathBuf,
    /// Remote coordinates, used for source links
    #[serde(default)]
    pub git: GitCoordinates,
    /// Scanner to use
    pub language: Language,
    /// Custom source link template
    #[serde(rename = "urlTemplate", default)]
    pub url_template: Option<String>,
}

impl SourceConfig {
    /// Coordinates handed to the scanner
    #[must_use]
    pub fn coordinates(&self) -> SourceCoordinates {
        SourceCoordinates {
            local: self.local.clone(),
            git: self.git.clone(),
            url_template: self.url_template.clone(),
        }
    }
}

/// Mapping file location; empty when sources are scanned instead
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Path of the JSON mapping file
    pub local: PathBuf,
}

/// One directory of test reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReportConfig {
    /// Report format name, e.g. `xunit-xml`
    #[serde(rename = "type")]
    pub kind: String,
    /// Directory holding the reports
    pub local: PathBuf,
}

/// Delivery to report on separately
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Program name
    pub program: String,
    /// Delivery version
    pub version: String,
    /// Backlog items in `Tracker:id, ...` notation
    pub backlogitems: String,
}

/// Log settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `debug`, `info`, `warning`, `error` or `fatal`
    pub level: String,
}

fn default_work_dir() -> PathBuf {
    PathBuf::from("./work")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./out")
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub settings
    #[serde(default)]
    pub github: GithubConfig,
    /// Jira settings
    #[serde(default)]
    pub jira: JiraConfig,
    /// Source checkouts to scan
    #[serde(default)]
    pub sourcecode: Vec<SourceConfig>,
    /// Mapping file used instead of scanning
    #[serde(default)]
    pub mapping: MappingConfig,
    /// Test report directories
    #[serde(rename = "testReport", default)]
    pub test_report: Vec<TestReportConfig>,
    /// Delivery settings
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Directory for run state such as the comment cache
    #[serde(rename = "workDir", default = "default_work_dir")]
    pub work_dir: PathBuf,
    /// Directory the reports are written to
    #[serde(rename = "outputDir", default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Log settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Delivery description file
#[derive(Debug, Deserialize)]
struct DeliveryFile {
    program: String,
    delivery: String,
    #[serde(default)]
    jira_keys: Vec<String>,
    #[serde(default)]
    github_keys: Vec<String>,
}

impl Config {
    /// Read, normalize and validate the configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let mut config = Self::parse(&text, path)?;
        config.apply_github_token(std::env::var(GITHUB_TOKEN_VAR).ok());
        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text and normalize the GitHub base URL
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(text).map_err(|source| ConfigError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

        let trimmed = config.github.base_url.trim_end_matches('/').len();
        config.github.base_url.truncate(trimmed);
        if config.github.base_url.is_empty() {
            tracing::warn!("GitHub base URL is not configured, source and issue links will be incomplete");
        }

        Ok(config)
    }

    /// Use a token from the environment when one is set
    pub fn apply_github_token(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            tracing::debug!("Using GitHub token from {}", GITHUB_TOKEN_VAR);
            self.github.access_token = token;
        }
    }

    /// Check the configured paths and create the work and output directories
    pub fn validate(&self) -> Result<(), ConfigError> {
        for dir in [&self.work_dir, &self.output_dir] {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::io_error(dir, e))?;
        }

        if let Some(mapping) = self.mapping_file() {
            if !mapping.exists() {
                return Err(ConfigError::MissingPath {
                    what: "mapping file",
                    path: mapping.to_path_buf(),
                });
            }
        } else {
            if self.sourcecode.is_empty() {
                return Err(ConfigError::NoSources);
            }
            for source in &self.sourcecode {
                if !source.local.is_dir() {
                    return Err(ConfigError::MissingSourceCheckout {
                        repository: source.coordinates().display_name(),
                        path: source.local.clone(),
                    });
                }
            }
        }

        if !self.delivery_items().is_empty() {
            self.delivery_report_name()?;
        }

        for report in &self.test_report {
            if !report.local.exists() {
                return Err(ConfigError::MissingPath {
                    what: "test report directory",
                    path: report.local.clone(),
                });
            }
            let mut entries = std::fs::read_dir(&report.local).map_err(|e| ConfigError::io_error(&report.local, e))?;
            if entries.next().is_none() {
                return Err(ConfigError::EmptyReportDir(report.local.clone()));
            }
        }

        Ok(())
    }

    /// Take program, version and backlog items from a delivery file
    ///
    /// A missing file is reported and ignored.
    pub fn apply_delivery_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            tracing::error!("Delivery file {} does not exist, ignoring it", path.display());
            return Ok(());
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let file: DeliveryFile = serde_json::from_str(&text).map_err(|source| ConfigError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

        self.delivery.program = file.program.replace(' ', "");
        self.delivery.version = file.delivery.replace(' ', "");

        let items: Vec<String> = file
            .github_keys
            .iter()
            .map(|k| format!("GitHub:{k}"))
            .chain(file.jira_keys.iter().map(|k| format!("Jira:{k}")))
            .collect();
        self.delivery.backlogitems = items.join(", ");

        tracing::info!(
            items = items.len(),
            "Delivery {} {} read from {}",
            self.delivery.program,
            self.delivery.version,
            path.display()
        );
        Ok(())
    }

    /// Base URLs for issue links
    #[must_use]
    pub fn issue_links(&self) -> IssueLinks {
        IssueLinks::new(self.github.base_url.clone(), self.jira.base_url.clone())
    }

    /// Mapping file, if one is configured
    #[must_use]
    pub fn mapping_file(&self) -> Option<&Path> {
        let local = self.mapping.local.as_path();
        (!local.as_os_str().is_empty()).then_some(local)
    }

    /// Report file stem for the delivery, `ctm_report_<version>`
    ///
    /// Versions that would clash with the full report or leave the output
    /// directory are rejected.
    pub fn delivery_report_name(&self) -> Result<String, ConfigError> {
        let version = self.delivery.version.trim();
        if version.is_empty() {
            return Ok("ctm_report_delivery".to_string());
        }
        if version.eq_ignore_ascii_case("all") || version.contains(['/', '\\']) || version.contains("..") {
            return Err(ConfigError::InvalidDeliveryVersion(version.to_string()));
        }
        Ok(format!("ctm_report_{version}"))
    }

    /// Backlog items of the configured delivery
    #[must_use]
    pub fn delivery_items(&self) -> Vec<BacklogReference> {
        if self.delivery.backlogitems.trim().is_empty() {
            return Vec::new();
        }
        parse_backlog_references(&self.delivery.backlogitems)
    }
}
