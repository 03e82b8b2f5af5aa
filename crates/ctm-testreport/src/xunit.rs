//! xUnit XML report reader
//!
//! Accepts the two root shapes produced in the wild:
//! a single `<testsuite>` element, or a `<testsuites>` wrapper around
//! several of them.

use crate::case::{TestCase, TestResult, TestSuite};
use crate::error::ReportError;
use roxmltree::{Document, Node, ParsingOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use walkdir::WalkDir;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// xUnit XML (JUnit schema and its Python/JS variants)
    XunitXml,
}

impl ReportKind {
    /// Configuration name of the format
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::XunitXml => "xunit-xml",
        }
    }

    /// All supported format names
    #[must_use]
    pub fn supported() -> &'static [&'static str] {
        &["xunit-xml"]
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xunit-xml" => Ok(ReportKind::XunitXml),
            other => Err(other.to_string()),
        }
    }
}

/// Recursive reader for xUnit XML reports
#[derive(Debug, Clone, Copy, Default)]
pub struct XunitReader;

impl XunitReader {
    /// Create new reader
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Read every `.xml` file below `root`
    ///
    /// Files that do not hold a report contribute no suites. Non-UTF-8 bytes
    /// are replaced. A file that cannot be read aborts the run.
    pub fn read_dir(&self, root: &Path) -> Result<Vec<TestSuite>, ReportError> {
        let started = Instant::now();

        if !root.exists() {
            return Err(ReportError::Walk {
                path: root.to_path_buf(),
                message: "directory does not exist".to_string(),
            });
        }

        let mut suites = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable report entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("xml") {
                continue;
            }

            tracing::info!("Parsing {}", path.display());
            let bytes = std::fs::read(path).map_err(|e| ReportError::io_error(path, e))?;
            let text = String::from_utf8_lossy(&bytes);
            suites.extend(parse_report(path, &text));
        }

        tracing::info!(
            suites = suites.len(),
            "Scan xunit XML test reports took {:?}",
            started.elapsed()
        );
        Ok(suites)
    }
}

/// Parse one report file's text into test suites
#[must_use]
pub fn parse_report(path: &Path, text: &str) -> Vec<TestSuite> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    let doc = match Document::parse_with_options(text, options) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::info!("No test cases found in {} ({})", path.display(), e);
            return Vec::new();
        }
    };

    let root = doc.root_element();
    match root.tag_name().name() {
        "testsuite" => {
            let suite = read_suite(path, root);
            if suite.is_empty() {
                tracing::info!("No test cases found in {}", path.display());
                Vec::new()
            } else {
                vec![suite]
            }
        }
        "testsuites" => root
            .children()
            .filter(|n| n.has_tag_name("testsuite"))
            .map(|n| read_suite(path, n))
            .collect(),
        other => {
            tracing::info!("No test cases found in {} (root element <{}>)", path.display(), other);
            Vec::new()
        }
    }
}

fn read_suite(path: &Path, node: Node<'_, '_>) -> TestSuite {
    let test_cases = node
        .children()
        .filter(|n| n.has_tag_name("testcase"))
        .map(|n| read_case(path, n))
        .collect();

    TestSuite {
        name: node.attribute("name").unwrap_or_default().to_string(),
        declared_skipped: declared_skipped(node),
        test_cases,
    }
}

fn read_case(path: &Path, node: Node<'_, '_>) -> TestCase {
    TestCase {
        report_file: path.to_path_buf(),
        class_name: node.attribute("classname").unwrap_or_default().to_string(),
        method_name: node.attribute("name").unwrap_or_default().to_string(),
        result: case_result(node),
    }
}

/// Outcome from the marker children of a `<testcase>`
fn case_result(node: Node<'_, '_>) -> TestResult {
    let has = |name: &str| node.children().any(|n| n.has_tag_name(name));

    if has("failure") {
        TestResult::Failure
    } else if has("error") {
        TestResult::Error
    } else if has("skipped") {
        TestResult::Skipped
    } else {
        TestResult::Success
    }
}

/// Skip count from `skipped` (JUnit) or `skips` (Python xunit)
fn declared_skipped(node: Node<'_, '_>) -> u32 {
    node.attribute("skipped")
        .filter(|s| !s.is_empty())
        .or_else(|| node.attribute("skips").filter(|s| !s.is_empty()))
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SINGLE: &str = r#"
        <testsuite name="PhantomJS 2.1.1" package="WTM" tests="14" errors="0" failures="0" time="6.932">
            <properties>
                <property name="browser.fullName" value="Mozilla/5.0"/>
            </properties>
            <testcase name="This is simple test case" time="0.263" classname="XUNIT.Test"/>
        </testsuite>
    "#;

    fn parse(text: &str) -> Vec<TestSuite> {
        parse_report(Path::new("test_path.xml"), text)
    }

    #[test]
    fn single_testsuite() {
        let suites = parse(SINGLE);

        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].name, "PhantomJS 2.1.1");
        assert_eq!(suites[0].test_cases.len(), 1);

        let case = &suites[0].test_cases[0];
        assert_eq!(case.class_name, "XUNIT.Test");
        assert_eq!(case.method_name, "This is simple test case");
        assert_eq!(case.result, TestResult::Success);
        assert_eq!(case.report_file, Path::new("test_path.xml"));
    }

    #[test]
    fn wrapped_testsuites() {
        let text = format!("<testsuites>{}<testsuite name=\"second\"><testcase classname=\"A\" name=\"b\"/></testsuite></testsuites>", SINGLE);
        let suites = parse(&text);

        assert_eq!(suites.len(), 2);
        assert_eq!(suites[0].test_cases[0].class_name, "XUNIT.Test");
        assert_eq!(suites[1].name, "second");
    }

    #[test]
    fn testsuite_without_testcases_yields_nothing() {
        let text = r#"
            <testsuite name="x" tests="14">
                <not-a-valid-testcase name="This is simple test case" classname="XUNIT.Test"/>
            </testsuite>
        "#;
        assert!(parse(text).is_empty());
    }

    #[test]
    fn malformed_xml_yields_nothing() {
        assert!(parse("<testsuite><testcase").is_empty());
        assert!(parse("not xml at all").is_empty());
    }

    #[test]
    fn unknown_root_yields_nothing() {
        assert!(parse(r#"<project><testcase classname="A" name="b"/></project>"#).is_empty());
    }

    #[test]
    fn failure_child_marks_failure() {
        let text = r#"<testsuite name="s">
            <testcase classname="A" name="failing"><failure message="boom">trace</failure></testcase>
            <testcase classname="A" name="passing"/>
        </testsuite>"#;
        let suites = parse(text);

        assert_eq!(suites[0].test_cases[0].result, TestResult::Failure);
        assert_eq!(suites[0].test_cases[1].result, TestResult::Success);
    }

    #[test]
    fn error_and_skipped_children() {
        let text = r#"<testsuite name="s">
            <testcase classname="A" name="e"><error type="NPE"/></testcase>
            <testcase classname="A" name="s"><skipped/></testcase>
            <testcase classname="A" name="fe"><error/><failure/></testcase>
            <testcase classname="A" name="out"><system-out>log</system-out></testcase>
        </testsuite>"#;
        let results: Vec<_> = parse(text)[0].test_cases.iter().map(|c| c.result).collect();

        assert_eq!(
            results,
            vec![TestResult::Error, TestResult::Skipped, TestResult::Failure, TestResult::Success]
        );
    }

    #[test]
    fn skip_count_honours_both_attribute_names() {
        let junit = r#"<testsuite name="s" skipped="2"><testcase classname="A" name="a"/></testsuite>"#;
        let python = r#"<testsuite name="s" skips="3"><testcase classname="A" name="a"/></testsuite>"#;
        let both = r#"<testsuite name="s" skipped="1" skips="5"><testcase classname="A" name="a"/></testsuite>"#;
        let broken = r#"<testsuite name="s" skipped="many"><testcase classname="A" name="a"/></testsuite>"#;

        assert_eq!(parse(junit)[0].declared_skipped, 2);
        assert_eq!(parse(python)[0].declared_skipped, 3);
        assert_eq!(parse(both)[0].declared_skipped, 1);
        assert_eq!(parse(broken)[0].declared_skipped, 0);
    }

    #[test]
    fn report_kind_from_str() {
        assert_eq!("xunit-xml".parse::<ReportKind>(), Ok(ReportKind::XunitXml));
        assert!("surefire".parse::<ReportKind>().is_err());
        assert_eq!(ReportKind::XunitXml.name(), "xunit-xml");
    }

    #[test]
    fn read_dir_walks_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("module/target");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("TEST-a.xml"), SINGLE).unwrap();
        std::fs::write(nested.join("TEST-b.xml"), SINGLE).unwrap();
        std::fs::write(nested.join("notes.txt"), "<testsuite/>").unwrap();
        std::fs::write(nested.join("broken.xml"), "<<<").unwrap();

        let suites = XunitReader::new().read_dir(dir.path()).unwrap();

        assert_eq!(suites.len(), 2);
        let files: Vec<_> = suites.iter().filter_map(|s| s.first_report_file()).collect();
        assert!(files.iter().any(|f| f.ends_with("TEST-a.xml")));
        assert!(files.iter().any(|f| f.ends_with("module/target/TEST-b.xml")));
    }

    #[test]
    fn non_utf8_report_does_not_abort_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_good.xml"), SINGLE).unwrap();
        let mut latin1 = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<testsuite name=\"caf".to_vec();
        latin1.push(0xE9);
        latin1.extend_from_slice(b"\"><testcase classname=\"L.T\" name=\"m\"/></testsuite>\n");
        std::fs::write(dir.path().join("b_latin1.xml"), latin1).unwrap();

        let suites = XunitReader::new().read_dir(dir.path()).unwrap();

        assert!(suites.iter().any(|s| s.name == "PhantomJS 2.1.1"));
        assert!(suites.len() <= 2);
    }

    #[test]
    fn read_dir_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = XunitReader::new().read_dir(&dir.path().join("missing"));
        assert!(matches!(result, Err(ReportError::Walk { .. })));
    }
}
