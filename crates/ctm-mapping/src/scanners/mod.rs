//! Per-language test trace scanners
//!
//! Each scanner walks a source tree and recovers test declarations with
//! their backlog references from comment markers:
//! - Java (`// Trace(...)` above classes and `@Test` methods)
//! - Python (`# Trace(...)` above `unittest` classes and `test_` methods)
//! - JavaScript/TypeScript (`describe`/`it` blocks)
//! - Gauge specs (headings plus a `Requirements:` line)
//!
//! Scanners work line by line with small heuristics; they are not parsers.

use crate::backlog::IssueLinks;
use crate::error::ScanError;
use crate::identity::TestBacklogEntry;
use crate::source_url::{source_url, SourceCoordinates};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use walkdir::{DirEntry, WalkDir};

pub mod gauge;
pub mod java;
pub mod javascript;
pub mod python;

pub use gauge::GaugeSpecScanner;
pub use java::JavaScanner;
pub use javascript::JavaScriptScanner;
pub use python::PythonScanner;

/// Directories never descended into
const VENDOR_DIRS: &[&str] = &["node_modules", ".git"];

/// Supported source languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Java (JUnit)
    Java,
    /// Python (unittest)
    Python,
    /// JavaScript and TypeScript (Mocha/Jasmine style)
    JavaScript,
    /// Gauge specifications
    GaugeSpec,
}

impl Language {
    /// Get file extensions for this language
    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Java => &["java"],
            Language::Python => &["py"],
            Language::JavaScript => &["js", "ts"],
            Language::GaugeSpec => &["spec"],
        }
    }

    /// Get configuration name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::GaugeSpec => "gaugespec",
        }
    }

    /// Scanner for this language
    #[must_use]
    pub fn scanner(&self) -> Box<dyn SourceScanner> {
        match self {
            Language::Java => Box::new(JavaScanner),
            Language::Python => Box::new(PythonScanner),
            Language::JavaScript => Box::new(JavaScriptScanner),
            Language::GaugeSpec => Box::new(GaugeSpecScanner),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Language::Java),
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::JavaScript),
            "gaugespec" => Ok(Language::GaugeSpec),
            other => Err(ScanError::UnknownLanguage(other.to_string())),
        }
    }
}

/// The file a scanner is currently looking at
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanFile {
    /// Path as found by the walk
    pub path: PathBuf,
    /// Path relative to the scanned root
    pub relative_path: PathBuf,
    /// Link to the file in its repository
    pub source_url: Option<String>,
}

impl ScanFile {
    /// Describe `path` found below `root`
    #[must_use]
    pub fn new(root: &Path, path: &Path, source_url: Option<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            relative_path: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
            source_url,
        }
    }

    /// File known only by its relative path (used by tests and tools)
    #[must_use]
    pub fn detached(relative_path: impl Into<PathBuf>) -> Self {
        let relative_path = relative_path.into();
        Self {
            path: relative_path.clone(),
            relative_path,
            source_url: None,
        }
    }
}

/// Scanner trait for recovering test backlog entries from source files
///
/// Implement this trait to add support for another test source format.
pub trait SourceScanner: Send + Sync {
    /// Language handled by this scanner
    fn language(&self) -> Language;

    /// Scan one file's content
    ///
    /// Scanner state lives only for the duration of this call.
    fn scan_content(&self, content: &str, file: &ScanFile) -> Vec<TestBacklogEntry>;

    /// Supported file extensions (without dot)
    fn extensions(&self) -> &[&str] {
        self.language().extensions()
    }

    /// Check if this scanner handles the given path
    fn can_scan(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions().contains(&ext))
            .unwrap_or(false)
    }

    /// Walk the checkout at `source.local` and scan every matching file
    ///
    /// A file that cannot be read aborts the scan.
    fn scan(&self, source: &SourceCoordinates, links: &IssueLinks) -> Result<Vec<TestBacklogEntry>, ScanError> {
        scan_tree(self, source, links)
    }
}

fn is_vendor_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| VENDOR_DIRS.contains(&name))
            .unwrap_or(false)
}

fn scan_tree<S>(scanner: &S, source: &SourceCoordinates, links: &IssueLinks) -> Result<Vec<TestBacklogEntry>, ScanError>
where
    S: SourceScanner + ?Sized,
{
    let started = Instant::now();
    let root = source.local.as_path();

    if !root.exists() {
        return Err(ScanError::Walk {
            path: root.to_path_buf(),
            message: "directory does not exist".to_string(),
        });
    }

    let mut entries = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_vendor_dir(e));

    for dir_entry in walker {
        let dir_entry = match dir_entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry below {}: {}", root.display(), e);
                continue;
            }
        };

        let path = dir_entry.path();
        if !dir_entry.file_type().is_file() || !scanner.can_scan(path) {
            continue;
        }

        tracing::debug!("Parsing {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| ScanError::io_error(path, e))?;
        let content = String::from_utf8_lossy(&bytes);

        let url = source_url(links, source, &path.to_string_lossy());
        let file = ScanFile::new(root, path, url);
        entries.extend(scanner.scan_content(&content, &file));
    }

    tracing::info!(
        entries = entries.len(),
        "Parse {} sourcecode ({}) took {:?}",
        scanner.language(),
        source.display_name(),
        started.elapsed()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_extensions() {
        assert_eq!(Language::Java.extensions(), &["java"]);
        assert_eq!(Language::JavaScript.extensions(), &["js", "ts"]);
        assert_eq!(Language::GaugeSpec.extensions(), &["spec"]);
    }

    #[test]
    fn language_from_str() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("gaugespec".parse::<Language>().unwrap(), Language::GaugeSpec);
        assert!(matches!("cobol".parse::<Language>(), Err(ScanError::UnknownLanguage(_))));
    }

    #[test]
    fn language_deserializes_lowercase() {
        let lang: Language = serde_json::from_str("\"javascript\"").unwrap();
        assert_eq!(lang, Language::JavaScript);
        assert!(serde_json::from_str::<Language>("\"cobol\"").is_err());
    }

    #[test]
    fn scanner_dispatch() {
        for lang in [Language::Java, Language::Python, Language::JavaScript, Language::GaugeSpec] {
            assert_eq!(lang.scanner().language(), lang);
        }
    }

    #[test]
    fn can_scan_by_extension() {
        let scanner = Language::JavaScript.scanner();
        assert!(scanner.can_scan(Path::new("test/a.spec.ts")));
        assert!(scanner.can_scan(Path::new("a.js")));
        assert!(!scanner.can_scan(Path::new("a.java")));
        assert!(!scanner.can_scan(Path::new("Makefile")));
    }

    #[test]
    fn scan_file_relative_path() {
        let file = ScanFile::new(Path::new("/src"), Path::new("/src/pkg/mod.py"), None);
        assert_eq!(file.relative_path, PathBuf::from("pkg/mod.py"));
    }

    #[test]
    fn scan_walks_tree_and_skips_vendor_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("test")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/lib")).unwrap();

        let suite = "// Trace(Jira:WEB-1)\ndescribe('Login', () => {\n  it('works', () => {});\n});\n";
        std::fs::write(root.join("test/login.js"), suite).unwrap();
        std::fs::write(root.join("node_modules/lib/vendor.js"), suite).unwrap();
        std::fs::write(root.join("test/readme.md"), suite).unwrap();

        let coords = SourceCoordinates::local(root);
        let entries = JavaScriptScanner.scan(&coords, &IssueLinks::default()).unwrap();

        // whole-suite entry plus the `it` entry, vendor copy ignored
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.test.class_name == "Login"));
    }

    #[test]
    fn scan_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let coords = SourceCoordinates::local(dir.path().join("missing"));
        assert!(matches!(
            JavaScanner.scan(&coords, &IssueLinks::default()),
            Err(ScanError::Walk { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_source_file_aborts() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Broken.java");
        std::fs::write(&file, "class Broken {}").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o000)).unwrap();

        // running as root bypasses permission bits
        if std::fs::read(&file).is_ok() {
            return;
        }

        let coords = SourceCoordinates::local(dir.path());
        assert!(matches!(
            JavaScanner.scan(&coords, &IssueLinks::default()),
            Err(ScanError::Io { .. })
        ));
    }
}
