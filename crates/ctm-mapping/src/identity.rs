//! Declared tests and their backlog references

use crate::backlog::BacklogReference;
use crate::matcher::TestCaseMatcher;
use ctm_testreport::TestCase;
use std::fmt;

/// One addressable automated test, or a whole test class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TestIdentity {
    /// Link to the test source, when known
    pub file_url: Option<String>,
    /// Qualified class (or spec) name
    pub class_name: String,
    /// Method (or scenario) name; empty for the whole class
    pub method_name: String,
}

impl TestIdentity {
    /// Create identity without a source link
    #[must_use]
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            file_url: None,
            class_name: class_name.into(),
            method_name: method_name.into(),
        }
    }

    /// Attach a source link
    #[must_use]
    pub fn with_file_url(mut self, file_url: Option<String>) -> Self {
        self.file_url = file_url;
        self
    }

    /// Whether this identity stands for every test of the class
    #[inline]
    #[must_use]
    pub fn is_whole_class(&self) -> bool {
        self.method_name.is_empty()
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole_class() {
            f.write_str(&self.class_name)
        } else {
            write!(f, "{}.{}", self.class_name, self.method_name)
        }
    }
}

/// A test declared to verify one or more backlog items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBacklogEntry {
    /// Declared test
    pub test: TestIdentity,
    /// Backlog items, in declaration order
    pub backlog_references: Vec<BacklogReference>,
    /// Matching policy against executed test cases
    pub matcher: TestCaseMatcher,
}

impl TestBacklogEntry {
    /// Create entry with the default matcher
    #[must_use]
    pub fn new(test: TestIdentity, backlog_references: Vec<BacklogReference>) -> Self {
        Self {
            test,
            backlog_references,
            matcher: TestCaseMatcher::Exact,
        }
    }

    /// Replace the matcher
    #[must_use]
    pub fn with_matcher(mut self, matcher: TestCaseMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Whether `case` is an execution of this entry's test
    #[inline]
    #[must_use]
    pub fn matches(&self, case: &TestCase) -> bool {
        self.matcher.matches(&self.test, case)
    }
}
