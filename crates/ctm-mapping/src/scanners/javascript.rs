//! Mocha/Jasmine style test scanner for JavaScript and TypeScript
//!
//! A marker applies to every following `describe` and `it` in the file.
//! Nested `describe` blocks are recognized by indentation and named
//! `<outer> <inner>`, the way reporters print them.

use super::{Language, ScanFile, SourceScanner};
use crate::backlog::{contains_marker, parse_backlog_references, BacklogReference};
use crate::identity::{TestBacklogEntry, TestIdentity};

/// Scanner for `.js` and `.ts` sources
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptScanner;

impl SourceScanner for JavaScriptScanner {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn scan_content(&self, content: &str, file: &ScanFile) -> Vec<TestBacklogEntry> {
        let mut state = JsState::default();
        let mut entries = Vec::new();

        for line in content.lines() {
            state.process_line(line, file, &mut entries);
        }

        entries
    }
}

#[derive(Debug, Default)]
struct JsState {
    refs: Vec<BacklogReference>,
    suite_name: String,
    suite_indent: usize,
    tests_seen: usize,
}

impl JsState {
    fn process_line(&mut self, line: &str, file: &ScanFile, out: &mut Vec<TestBacklogEntry>) {
        if contains_marker(line) {
            self.refs = parse_backlog_references(line);
            return;
        }

        if let Some(name) = quoted_call(line, "describe") {
            let indent = indentation(line);
            if indent > self.suite_indent && !self.suite_name.is_empty() {
                self.suite_name.push(' ');
                self.suite_name.push_str(name);
            } else {
                self.suite_name = name.to_string();
            }
            self.suite_indent = indent;

            // a marker seen before any test covers the whole suite
            if !self.refs.is_empty() && self.tests_seen == 0 {
                let test = TestIdentity::new(self.suite_name.as_str(), "").with_file_url(file.source_url.clone());
                out.push(TestBacklogEntry::new(test, self.refs.clone()));
            }
            return;
        }

        if self.suite_name.is_empty() || self.refs.is_empty() {
            return;
        }

        if let Some(name) = quoted_call(line, "it") {
            let test = TestIdentity::new(self.suite_name.as_str(), name.trim()).with_file_url(file.source_url.clone());
            out.push(TestBacklogEntry::new(test, self.refs.clone()));
            self.tests_seen += 1;
        }
    }
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// First string argument of a `callee('<name>', ...)` call on `line`
///
/// Both quote styles are accepted. Calls whose name is the tail of a longer
/// identifier (`submit(` for `it(`) are ignored.
pub fn quoted_call<'a>(line: &'a str, callee: &str) -> Option<&'a str> {
    let open = format!("{callee}(");

    for (start, _) in line.match_indices(&open) {
        if line[..start].chars().next_back().is_some_and(is_identifier_char) {
            continue;
        }

        let args = &line[start + open.len()..];
        let Some(quote) = args.chars().next().filter(|c| *c == '\'' || *c == '"') else {
            continue;
        };
        let body = &args[1..];
        let Some(close) = body.find(quote) else {
            continue;
        };
        if body[close + 1..].trim_start().starts_with(',') {
            return Some(&body[..close]);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(source: &str) -> Vec<TestBacklogEntry> {
        JavaScriptScanner.scan_content(source, &ScanFile::detached("test/spec.js"))
    }

    fn names(entries: &[TestBacklogEntry]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|e| (e.test.class_name.clone(), e.test.method_name.clone()))
            .collect()
    }

    #[test]
    fn marker_before_suite_covers_suite_and_tests() {
        let source = r#"
// Trace(GitHub:myorg/web#12)
describe('Cart', () => {
  it('adds items', () => {
    expect(cart.add(1)).toBe(true);
  });
  it("removes items", () => {});
});
"#;
        let entries = scan(source);
        assert_eq!(
            names(&entries),
            vec![
                ("Cart".to_string(), String::new()),
                ("Cart".to_string(), "adds items".to_string()),
                ("Cart".to_string(), "removes items".to_string()),
            ]
        );
        assert!(entries
            .iter()
            .all(|e| e.backlog_references == vec![BacklogReference::github("myorg/web#12")]));
    }

    #[test]
    fn nested_suites_are_qualified() {
        let source = r#"
describe('Checkout', () => {
  // Trace(Jira:SHOP-7)
  describe('payment', () => {
    it('accepts cards', () => {});
  });
});
describe('Other', () => {
  it('does things', () => {});
});
"#;
        assert_eq!(
            names(&scan(source)),
            vec![
                ("Checkout payment".to_string(), String::new()),
                ("Checkout payment".to_string(), "accepts cards".to_string()),
                ("Other".to_string(), "does things".to_string()),
            ]
        );
    }

    #[test]
    fn suite_after_first_test_gets_no_class_entry() {
        let source = "// Trace(Jira:A-1)\ndescribe('One', () => {\n  it('a', () => {});\n});\ndescribe('Two', () => {\n  it('b', () => {});\n});\n";
        assert_eq!(
            names(&scan(source)),
            vec![
                ("One".to_string(), String::new()),
                ("One".to_string(), "a".to_string()),
                ("Two".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn untraced_file_yields_nothing() {
        assert!(scan("describe('S', () => {\n  it('t', () => {});\n});\n").is_empty());
    }

    #[test]
    fn quoted_call_heuristic() {
        assert_eq!(quoted_call("  it('works', () => {", "it"), Some("works"));
        assert_eq!(quoted_call("  it(\"works\", function() {", "it"), Some("works"));
        assert_eq!(quoted_call("  submit('form', x)", "it"), None);
        assert_eq!(quoted_call("  it(name, fn)", "it"), None);
        assert_eq!(quoted_call("describe('A suite', () => {", "describe"), Some("A suite"));
    }
}
