//! `unittest` test scanner
//!
//! The module path of the file (relative to the scanned root) stands in for
//! a package: `pkg/test_x.py` declares classes as `pkg.test_x.<Class>`.

use super::{Language, ScanFile, SourceScanner};
use crate::backlog::{contains_marker, parse_backlog_references, BacklogReference};
use crate::identity::{TestBacklogEntry, TestIdentity};
use std::path::Path;

/// Scanner for `.py` sources
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonScanner;

impl SourceScanner for PythonScanner {
    fn language(&self) -> Language {
        Language::Python
    }

    fn scan_content(&self, content: &str, file: &ScanFile) -> Vec<TestBacklogEntry> {
        let mut state = PythonState {
            module: module_name(&file.relative_path),
            ..PythonState::default()
        };
        let mut entries = Vec::new();

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            state.process_line(line, file, &mut entries);
        }

        entries
    }
}

#[derive(Debug, Default)]
struct PythonState {
    module: String,
    class_name: String,
    class_refs: Vec<BacklogReference>,
    method_refs: Vec<BacklogReference>,
}

impl PythonState {
    fn process_line(&mut self, line: &str, file: &ScanFile, out: &mut Vec<TestBacklogEntry>) {
        if contains_marker(line) {
            let refs = parse_backlog_references(line);
            if self.class_name.is_empty() {
                self.class_refs = refs;
            } else {
                self.method_refs = refs;
            }
            return;
        }

        if let Some(start) = line.rfind("class ") {
            if start > 0 && !line[..start].ends_with(char::is_whitespace) {
                return;
            }
            if let Some(name) = class_name(&line[start + "class ".len()..]) {
                self.class_name = if self.module.is_empty() {
                    name.to_string()
                } else {
                    format!("{}.{}", self.module, name)
                };
            }
            return;
        }

        if self.class_name.is_empty() || (self.class_refs.is_empty() && self.method_refs.is_empty()) {
            return;
        }

        let Some(name) = def_name(line) else {
            return;
        };
        if !name.starts_with("test_") {
            return;
        }

        let test = TestIdentity::new(self.class_name.as_str(), name).with_file_url(file.source_url.clone());
        if !self.class_refs.is_empty() {
            out.push(TestBacklogEntry::new(test.clone(), self.class_refs.clone()));
        }
        if !self.method_refs.is_empty() {
            out.push(TestBacklogEntry::new(test, std::mem::take(&mut self.method_refs)));
        }
    }
}

/// Dotted module name of a source file path
pub fn module_name(relative_path: &Path) -> String {
    let path = relative_path.to_string_lossy().replace('\\', "/");
    let path = path.strip_suffix(".py").unwrap_or(path.as_str());
    path.trim_start_matches("./").replace('/', ".")
}

/// Class name at the start of `rest`, ending at the base list or the colon
fn class_name(rest: &str) -> Option<&str> {
    let end = rest.find(['(', ':'])?;
    let name = rest[..end].trim();
    (!name.is_empty()).then_some(name)
}

/// Function name on a `def <name>(` line
pub fn def_name(line: &str) -> Option<&str> {
    let start = line.find("def ")? + "def ".len();
    let open = line[start..].find('(')?;
    Some(line[start..start + open].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(source: &str) -> Vec<TestBacklogEntry> {
        PythonScanner.scan_content(source, &ScanFile::detached("testFile.py"))
    }

    fn expected(method: &str, refs: Vec<BacklogReference>) -> TestBacklogEntry {
        TestBacklogEntry::new(TestIdentity::new("testFile.TestStringMethods", method), refs)
    }

    #[test]
    fn class_and_method_markers() {
        let source = "
import unittest

 # Trace(Jira:MYPROJECT-1)
 class TestStringMethods(unittest.TestCase):

    def test_upper(self):
        self.assertEqual('foo'.upper(), 'FOO')

    # Trace(GitHub:myorg/myRepo#1)
    def test_isupper(self):
        self.assertTrue('FOO'.isupper())
        self.assertFalse('Foo'.isupper())

    def test_split(self):
        s = 'hello world'
        self.assertEqual(s.split(), ['hello', 'world'])
        # check that s.split fails when the separator is not a string
        with self.assertRaises(TypeError):
            s.split(2)
";
        assert_eq!(
            scan(source),
            vec![
                expected("test_upper", vec![BacklogReference::jira("MYPROJECT-1")]),
                expected("test_isupper", vec![BacklogReference::jira("MYPROJECT-1")]),
                expected("test_isupper", vec![BacklogReference::github("myorg/myRepo#1")]),
                expected("test_split", vec![BacklogReference::jira("MYPROJECT-1")]),
            ]
        );
    }

    #[test]
    fn class_marker_with_multiple_references() {
        let source = "
import unittest

# Trace(Jira:MYPROJECT-1, GitHub:myOrg/myRepo#2)
class TestStringMethods(unittest.TestCase):

    def test_upper(self):
        self.assertEqual('foo'.upper(), 'FOO')

    def helper(self):
        pass

    def test_isupper(self):
        self.assertTrue('FOO'.isupper())
";
        let refs = vec![BacklogReference::jira("MYPROJECT-1"), BacklogReference::github("myOrg/myRepo#2")];
        assert_eq!(
            scan(source),
            vec![expected("test_upper", refs.clone()), expected("test_isupper", refs)]
        );
    }

    #[test]
    fn untraced_class_yields_nothing() {
        let source = "class TestPlain(unittest.TestCase):\n    def test_a(self):\n        pass\n";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn nested_module_path() {
        let file = ScanFile::detached("pkg/sub/test_mod.py");
        let source = "# Trace(Jira:P-1)\nclass TestX:\n    def test_x(self):\n        pass\n";
        let entries = PythonScanner.scan_content(source, &file);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].test.class_name, "pkg.sub.test_mod.TestX");
    }

    #[test]
    fn heuristics() {
        assert_eq!(module_name(Path::new("a/b/c.py")), "a.b.c");
        assert_eq!(def_name("    def test_upper(self):"), Some("test_upper"));
        assert_eq!(def_name("    x = 1"), None);
        assert_eq!(class_name(" Foo(Base):"), Some("Foo"));
        assert_eq!(class_name(" Foo:"), Some("Foo"));
        assert_eq!(class_name(" Foo"), None);
    }
}
