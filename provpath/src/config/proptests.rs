//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::Config;
use crate::output::OutputFormat;
use crate::resolver::BatchPolicy;
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[A-Z][a-z]{1,10}(\\.[A-Z][a-z]{1,10})?"),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(prop_oneof![
            Just(BatchPolicy::FailFast),
            Just(BatchPolicy::ContinueOnError)
        ]),
        prop::option::of(prop_oneof![Just(OutputFormat::Lines), Just(OutputFormat::Json)]),
        prop::option::of(prop::collection::vec("\\*\\.[a-z]{1,4}", 0..4)),
    )
        .prop_map(
            |(namespace, force, use_32bit_view, batch_policy, output_format, exclude)| Config {
                namespace,
                force,
                use_32bit_view,
                batch_policy,
                output_format,
                exclude,
                ..Default::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Values set in the higher-precedence source always win
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.namespace, high.namespace.or(low.namespace));
        prop_assert_eq!(merged.force, high.force.or(low.force));
        prop_assert_eq!(merged.use_32bit_view, high.use_32bit_view.or(low.use_32bit_view));
        prop_assert_eq!(merged.batch_policy, high.batch_policy.or(low.batch_policy));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
    }

    // Exclude patterns from both sources survive the merge
    #[test]
    fn config_merge_exclude_is_union(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        let merged_exclude = merged.exclude.unwrap_or_default();
        for pattern in low.exclude.iter().chain(high.exclude.iter()).flatten() {
            prop_assert!(merged_exclude.contains(pattern));
        }
    }

    // Merging a config into itself changes nothing except deduplicating excludes
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut once = Config::default();
        ConfigMerger::merge_into(&mut once, &config);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &config);
        prop_assert_eq!(once, twice);
    }

    // Configs survive a YAML round trip
    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(back, config);
    }
}
