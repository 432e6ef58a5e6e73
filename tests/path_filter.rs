// tests/path_filter.rs

use std::path::PathBuf;

use proptest::prelude::*;

use gowatch::errors::GowatchError;
use gowatch::watch::PathFilter;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(_test)?\\.(go|md|txt)"
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*_test.go".to_string()),
        Just("*.md".to_string()),
        Just("?.go".to_string()),
        Just("[abc]*.txt".to_string()),
        "[a-z]{1,4}\\*",
        "[a-z]{1,8}\\.go",
    ]
}

proptest! {
    #[test]
    fn ignore_decision_is_order_independent(
        patterns in proptest::collection::vec(pattern_strategy(), 0..6),
        dirs in proptest::collection::vec("[a-z]{1,6}", 0..3),
        name in name_strategy(),
    ) {
        let mut path = PathBuf::from("/proj");
        for d in &dirs {
            path.push(d);
        }
        path.push(&name);

        let forward = PathFilter::new(&patterns).unwrap();
        let mut reversed_patterns = patterns.clone();
        reversed_patterns.reverse();
        let reversed = PathFilter::new(&reversed_patterns).unwrap();

        prop_assert_eq!(forward.should_ignore(&path), reversed.should_ignore(&path));
    }

    #[test]
    fn ignored_iff_some_single_pattern_matches(
        patterns in proptest::collection::vec(pattern_strategy(), 0..6),
        name in name_strategy(),
    ) {
        let path = PathBuf::from("/proj/pkg").join(&name);
        let filter = PathFilter::new(&patterns).unwrap();

        let any_single = patterns
            .iter()
            .any(|p| PathFilter::new([p]).unwrap().should_ignore(&path));

        prop_assert_eq!(filter.should_ignore(&path), any_single);
    }

    #[test]
    fn literal_names_never_match_other_names(
        a in "[a-z]{1,8}",
        b in "[a-z]{1,8}",
    ) {
        prop_assume!(a != b);
        let filter = PathFilter::new([format!("{a}.go")]).unwrap();
        let other = PathBuf::from(format!("/proj/{}.go", b));
        let same_name = PathBuf::from(format!("/proj/x/{}.go", a));
        prop_assert!(!filter.should_ignore(&other));
        prop_assert!(filter.should_ignore(&same_name));
    }
}

#[test]
fn malformed_pattern_fails_construction() {
    let err = PathFilter::new(["*.go", "vendor/[a-"]).unwrap_err();
    assert!(matches!(err, GowatchError::Pattern { ref pattern, .. } if pattern == "vendor/[a-"));
    assert!(err.to_string().contains("vendor/[a-"));
}
