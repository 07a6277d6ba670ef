//! Property-based tests for qualification.

use super::*;
use crate::provider::wildcard::has_wildcard;
use proptest::prelude::*;
use std::path::PathBuf;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,12}"
}

fn relative_fs_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => segment_strategy(),
            1 => Just(".".to_string()),
        ],
        1..6,
    )
    .prop_map(|parts| parts.join("/"))
}

fn registry_key_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["HKLM", "HKCU", "hkcr", "HKU", "HKEY_LOCAL_MACHINE", "HKLM:"]),
        prop::collection::vec(segment_strategy(), 0..5),
    )
        .prop_map(|(hive, parts)| {
            std::iter::once(hive.to_string())
                .chain(parts)
                .collect::<Vec<_>>()
                .join("\\")
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Qualifying a qualified filesystem path under the same provider is a no-op
    #[cfg(unix)]
    #[test]
    fn filesystem_qualification_idempotent(raw in relative_fs_strategy()) {
        let providers = ProviderRegistry::with_defaults();
        let ctx = ExecutionContext::new(PathBuf::from("/base"));
        let qualifier = PathQualifier::new(&providers, &ctx);

        let once = qualifier.qualify(&raw, None).unwrap().to_string();
        let twice = qualifier.qualify(&once, Some("FileSystem")).unwrap().to_string();
        prop_assert_eq!(once, twice);
    }

    // Same for registry keys written with any hive alias
    #[test]
    fn registry_qualification_idempotent(raw in registry_key_strategy()) {
        let providers = ProviderRegistry::with_defaults();
        let ctx = ExecutionContext::new(PathBuf::from("/"));
        let qualifier = PathQualifier::new(&providers, &ctx);

        let once = qualifier.qualify(&raw, Some("Registry")).unwrap();
        prop_assert!(once.native().starts_with("HKEY_"));
        let twice = qualifier.qualify(&once.to_string(), None).unwrap();
        prop_assert_eq!(once, twice);
    }

    // Display and parse agree
    #[test]
    fn display_parse_agree(
        ns in prop::collection::vec("[A-Za-z][A-Za-z0-9.]{0,8}", 0..3),
        provider in "[A-Za-z][A-Za-z0-9]{0,10}",
        native in "[A-Za-z0-9/\\\\:._-]{0,30}",
    ) {
        let path = QualifiedPath::new(ns.join("\\"), provider, native);
        let parsed = QualifiedPath::parse(&path.to_string()).unwrap();
        prop_assert_eq!(parsed, path);
    }

    // Identifier-only text never carries wildcard metacharacters
    #[test]
    fn identifiers_have_no_wildcards(s in "[A-Za-z0-9_.-]{1,20}") {
        prop_assert!(is_identifier(&s));
        prop_assert!(!has_wildcard(&s));
    }
}
