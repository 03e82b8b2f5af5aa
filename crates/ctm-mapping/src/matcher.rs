//! Policies for matching a declared test against an executed test case

use crate::identity::TestIdentity;
use ctm_testreport::TestCase;

/// How a declared test is matched against executed test cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestCaseMatcher {
    /// Same class; same method, or the declaration covers the whole class
    #[default]
    Exact,
    /// Gauge scenarios: like `Exact`, but a parameterized run may append a
    /// numeric suffix to the scenario title
    GaugeParameterized,
}

impl TestCaseMatcher {
    /// Whether `case` is an execution of `test`
    #[must_use]
    pub fn matches(self, test: &TestIdentity, case: &TestCase) -> bool {
        if test.class_name != case.class_name {
            return false;
        }
        if test.is_whole_class() || test.method_name == case.method_name {
            return true;
        }

        match self {
            TestCaseMatcher::Exact => false,
            TestCaseMatcher::GaugeParameterized => case
                .method_name
                .strip_prefix(test.method_name.as_str())
                .map(|suffix| suffix.trim().parse::<i64>().is_ok())
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctm_testreport::TestResult;

    fn case(class: &str, method: &str) -> TestCase {
        TestCase::new("r.xml", class, method, TestResult::Success)
    }

    #[test]
    fn exact_requires_same_names() {
        let test = TestIdentity::new("a.B", "m");
        assert!(TestCaseMatcher::Exact.matches(&test, &case("a.B", "m")));
        assert!(!TestCaseMatcher::Exact.matches(&test, &case("a.B", "m1")));
        assert!(!TestCaseMatcher::Exact.matches(&test, &case("a.C", "m")));
    }

    #[test]
    fn whole_class_matches_every_method() {
        let test = TestIdentity::new("a.B", "");
        assert!(TestCaseMatcher::Exact.matches(&test, &case("a.B", "anything")));
        assert!(TestCaseMatcher::GaugeParameterized.matches(&test, &case("a.B", "anything")));
    }

    #[test]
    fn gauge_class_names_must_match() {
        let test = TestIdentity::new("another spec title", "");
        assert!(!TestCaseMatcher::GaugeParameterized.matches(&test, &case("spec title", "")));
    }

    #[test]
    fn gauge_full_match() {
        let test = TestIdentity::new("spec title", "scenario title");
        assert!(TestCaseMatcher::GaugeParameterized.matches(&test, &case("spec title", "scenario title")));
    }

    #[test]
    fn gauge_numeric_suffix() {
        let test = TestIdentity::new("spec title", "scenario title");
        let m = TestCaseMatcher::GaugeParameterized;

        assert!(m.matches(&test, &case("spec title", "scenario title 1")));
        assert!(m.matches(&test, &case("spec title", "scenario title 42")));
        assert!(!m.matches(&test, &case("spec title", "scenario title x")));
        assert!(!m.matches(&test, &case("spec title", "scenario")));
        assert!(!TestCaseMatcher::Exact.matches(&test, &case("spec title", "scenario title 1")));
    }
}
