//! Layer merging.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Folds configuration layers into one.
///
/// Scalar fields take the last value that is set. `exclude` lists are
/// concatenated in layer order with duplicates dropped.
///
/// ```
/// use provpath::config::{Config, ConfigMerger};
///
/// let mut merged = Config { namespace: Some("Low".to_string()), ..Default::default() };
/// ConfigMerger::merge_into(
///     &mut merged,
///     &Config { namespace: Some("High".to_string()), ..Default::default() },
/// );
/// assert_eq!(merged.namespace.as_deref(), Some("High"));
/// ```
pub struct ConfigMerger;

fn overlay<T: Clone>(target: &mut Option<T>, layer: &Option<T>) {
    if layer.is_some() {
        target.clone_from(layer);
    }
}

impl ConfigMerger {
    /// Merges `sources`, which must be ordered lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        sources.iter().fold(Config::default(), |mut merged, source| {
            Self::merge_into(&mut merged, &source.config);
            merged
        })
    }

    /// Applies `layer` on top of `target`.
    pub fn merge_into(target: &mut Config, layer: &Config) {
        overlay(&mut target.namespace, &layer.namespace);
        overlay(&mut target.default_provider, &layer.default_provider);
        overlay(&mut target.location, &layer.location);
        overlay(&mut target.registry_location, &layer.registry_location);
        overlay(&mut target.registry_snapshot, &layer.registry_snapshot);
        overlay(&mut target.force, &layer.force);
        overlay(&mut target.use_32bit_view, &layer.use_32bit_view);
        overlay(&mut target.batch_policy, &layer.batch_policy);
        overlay(&mut target.output_format, &layer.output_format);
        overlay(&mut target.log_mode, &layer.log_mode);

        if let Some(patterns) = &layer.exclude {
            let accumulated = target.exclude.get_or_insert_with(Vec::new);
            for pattern in patterns {
                if !accumulated.contains(pattern) {
                    accumulated.push(pattern.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::BatchPolicy;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("/config/{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }

    #[test]
    fn test_higher_precedence_wins() {
        let merged = ConfigMerger::merge(vec![
            source(
                1,
                Config {
                    namespace: Some("User".to_string()),
                    force: Some(true),
                    ..Default::default()
                },
            ),
            source(
                2,
                Config {
                    namespace: Some("Project".to_string()),
                    batch_policy: Some(BatchPolicy::ContinueOnError),
                    ..Default::default()
                },
            ),
        ]);

        assert_eq!(merged.namespace.as_deref(), Some("Project"));
        assert_eq!(merged.force, Some(true));
        assert_eq!(merged.batch_policy, Some(BatchPolicy::ContinueOnError));
    }

    #[test]
    fn test_none_does_not_override() {
        let mut target = Config {
            registry_location: Some(r"HKLM:\SOFTWARE".to_string()),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.registry_location.as_deref(), Some(r"HKLM:\SOFTWARE"));
    }

    #[test]
    fn test_exclude_accumulates_without_duplicates() {
        let mut target = Config {
            exclude: Some(vec!["*.bak".to_string()]),
            ..Default::default()
        };
        let source = Config {
            exclude: Some(vec!["*.tmp".to_string(), "*.bak".to_string()]),
            ..Default::default()
        };
        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(
            target.exclude,
            Some(vec!["*.bak".to_string(), "*.tmp".to_string()])
        );
    }
}
