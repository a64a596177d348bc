//! Property-based tests for the path algebra.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{is_strictly_within, normalize_lexically, RelPath};
    use proptest::prelude::*;
    use std::path::Path;

    /// Relative paths built from plain names, `.`, `..` and doubled separators.
    ///
    /// The leading `./` keeps an initial empty part from producing an absolute path.
    fn raw_relative_path() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                4 => "[a-z]{1,6}",
                1 => Just(".".to_string()),
                1 => Just("..".to_string()),
                1 => Just("".to_string()),
            ],
            0..8,
        )
        .prop_map(|parts| format!("./{}", parts.join("/")))
    }

    fn clean_relative_path() -> impl Strategy<Value = RelPath> {
        prop::collection::vec("[a-z]{1,6}", 0..6)
            .prop_map(|parts| RelPath::parse(&parts.join("/")).unwrap())
    }

    // ============================================================================
    // Normalization properties
    // ============================================================================

    proptest! {
        /// Property: normalizing twice gives the same result as normalizing once
        #[test]
        fn parse_is_idempotent(raw in raw_relative_path()) {
            let once = RelPath::parse(&raw).unwrap();
            let twice = RelPath::parse(&once.to_string()).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Property: normalized paths never contain `.` or empty segments,
        /// and `..` only appears as a leading run
        #[test]
        fn parse_leaves_only_leading_parent_segments(raw in raw_relative_path()) {
            let rel = RelPath::parse(&raw).unwrap();
            let segments = rel.segments();
            prop_assert!(segments.iter().all(|s| !s.is_empty() && s != "."));
            let leading = segments.iter().take_while(|s| *s == "..").count();
            prop_assert!(segments[leading..].iter().all(|s| s != ".."));
        }
    }

    // ============================================================================
    // Prefix algebra properties
    // ============================================================================

    proptest! {
        /// Property: stripping a joined prefix gives back the suffix
        #[test]
        fn strip_prefix_inverts_join(
            prefix in clean_relative_path(),
            suffix in clean_relative_path(),
        ) {
            let joined = prefix.join(&suffix);
            prop_assert!(joined.starts_with(&prefix));
            prop_assert_eq!(joined.strip_prefix(&prefix), Some(suffix));
        }

        /// Property: a name is never a prefix of a longer sibling name
        #[test]
        fn partial_segment_is_not_a_prefix(name in "[a-z]{1,6}", tail in "[a-z]{1,4}") {
            let short = RelPath::parse(&name).unwrap();
            let long = RelPath::parse(&format!("{}{}/f", name, tail)).unwrap();
            prop_assert!(!long.starts_with(&short));
            prop_assert_eq!(long.strip_prefix(&short), None);
        }

        /// Property: every path starts with the root
        #[test]
        fn root_is_universal_prefix(path in clean_relative_path()) {
            prop_assert_eq!(path.strip_prefix(&RelPath::root()), Some(path.clone()));
        }
    }

    // ============================================================================
    // Containment properties
    // ============================================================================

    proptest! {
        /// Property: a non-climbing, non-empty path placed under a root stays inside it
        #[test]
        fn non_escaping_paths_stay_within(raw in raw_relative_path()) {
            let rel = RelPath::parse(&raw).unwrap();
            let root = Path::new("/OUT/ROOT");
            let placed = rel.under(root);
            let inside = is_strictly_within(&placed, root);
            prop_assert_eq!(inside, !rel.escapes() && !rel.is_root());
        }

        /// Property: lexical normalization is idempotent
        #[test]
        fn normalize_lexically_is_idempotent(raw in raw_relative_path()) {
            let path = Path::new("/base").join(&raw);
            let once = normalize_lexically(&path);
            prop_assert_eq!(normalize_lexically(&once), once.clone());
        }
    }
}
