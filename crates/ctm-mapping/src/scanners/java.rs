//! JUnit test scanner
//!
//! Recognizes `// Trace(...)` markers above a class (references shared by
//! every test of the class) and above test methods. A method is a test when
//! it carries `@Test` or, JUnit 3 style, its name starts with `test`.
//!
//! Only one level of inner classes is tracked; deeper nesting is folded into
//! the last inner class name.

use super::{Language, ScanFile, SourceScanner};
use crate::backlog::{contains_marker, parse_backlog_references, BacklogReference};
use crate::identity::{TestBacklogEntry, TestIdentity};

const TEST_ANNOTATION: &str = "@Test";

/// Scanner for `.java` sources
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScanner;

impl SourceScanner for JavaScanner {
    fn language(&self) -> Language {
        Language::Java
    }

    fn scan_content(&self, content: &str, file: &ScanFile) -> Vec<TestBacklogEntry> {
        let mut state = JavaState::default();
        let mut entries = Vec::new();

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            state.process_line(line, file, &mut entries);
        }

        entries
    }
}

#[derive(Debug, Default)]
struct JavaState {
    package: String,
    class_name: String,
    class_refs: Vec<BacklogReference>,
    method_refs: Vec<BacklogReference>,
    test_annotation: bool,
}

impl JavaState {
    fn process_line(&mut self, line: &str, file: &ScanFile, out: &mut Vec<TestBacklogEntry>) {
        if let Some(pos) = line.find(TEST_ANNOTATION) {
            self.test_annotation = true;
            let tail = annotation_tail(&line[pos + TEST_ANNOTATION.len()..]);
            if is_method_signature(tail) {
                self.method_line(tail, file, out);
            }
            return;
        }

        if contains_marker(line) {
            let refs = parse_backlog_references(line);
            if self.class_name.is_empty() {
                self.class_refs = refs;
            } else {
                self.method_refs = refs;
            }
            return;
        }

        if self.package.is_empty() {
            if let Some(package) = package_name(line) {
                self.package = package.to_string();
                return;
            }
        }

        // outer class closes with a brace in column 0
        if line.starts_with('}') && !self.class_name.is_empty() {
            self.class_name.clear();
            return;
        }

        if let Some(name) = class_name(line) {
            self.open_class(name);
            return;
        }

        self.method_line(line, file, out);
    }

    fn open_class(&mut self, name: &str) {
        if self.class_name.is_empty() {
            self.class_name = if self.package.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", self.package, name)
            };
        } else {
            if let Some(inner) = self.class_name.rfind('$') {
                self.class_name.truncate(inner);
            }
            self.class_name.push('$');
            self.class_name.push_str(name);
        }
    }

    fn method_line(&mut self, line: &str, file: &ScanFile, out: &mut Vec<TestBacklogEntry>) {
        if self.class_name.is_empty() || (self.class_refs.is_empty() && self.method_refs.is_empty()) {
            return;
        }
        if !is_method_signature(line) {
            return;
        }
        let Some(name) = method_name(line) else {
            return;
        };

        if !self.test_annotation && name.starts_with("test") {
            self.test_annotation = true;
        }
        if !self.test_annotation {
            return;
        }

        let test = TestIdentity::new(self.class_name.as_str(), name).with_file_url(file.source_url.clone());
        if !self.class_refs.is_empty() {
            out.push(TestBacklogEntry::new(test.clone(), self.class_refs.clone()));
        }
        if !self.method_refs.is_empty() {
            out.push(TestBacklogEntry::new(test, std::mem::take(&mut self.method_refs)));
        }
        self.test_annotation = false;
    }
}

/// Text following `@Test`, past its optional argument list
fn annotation_tail(rest: &str) -> &str {
    skip_arguments(rest)
}

/// Text after a leading parenthesized argument list, if there is one
///
/// Parentheses inside string literals are not counted.
fn skip_arguments(rest: &str) -> &str {
    let trimmed = rest.trim_start();
    if !trimmed.starts_with('(') {
        return rest;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in trimmed.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return &trimmed[i + 1..];
                }
            }
            _ => {}
        }
    }
    ""
}

/// `line` without its leading annotations
fn skip_annotations(mut line: &str) -> &str {
    loop {
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix('@') else {
            return trimmed;
        };
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(rest.len());
        line = skip_arguments(&rest[end..]);
    }
}

fn is_method_signature(line: &str) -> bool {
    line.contains('{') && line.contains('(')
}

/// Package declared on `line`, without the trailing `;`
pub fn package_name(line: &str) -> Option<&str> {
    let start = line.rfind("package ")?;
    let rest = &line[start + "package ".len()..];
    let name = rest.split_once(';').map_or(rest, |(name, _)| name).trim();
    (!name.is_empty()).then_some(name)
}

/// Simple name of a class declared on `line`
///
/// The `class` keyword must start the line or follow whitespace, which
/// keeps `Foo.class` literals out.
pub fn class_name(line: &str) -> Option<&str> {
    let start = line.rfind("class ")?;
    if start > 0 && !line[..start].ends_with(char::is_whitespace) {
        return None;
    }

    let word = line[start + "class ".len()..].split_whitespace().next()?;
    let word = word.rfind('<').map_or(word, |generic| &word[..generic]);
    let word = word.rfind('{').map_or(word, |brace| &word[..brace]);
    (!word.is_empty()).then_some(word)
}

/// Method name on a signature line: the last word before `(`, after any
/// leading annotations
pub fn method_name(line: &str) -> Option<&str> {
    let line = skip_annotations(line);
    let open = line.find('(')?;
    line[..open].split_whitespace().last()
}
