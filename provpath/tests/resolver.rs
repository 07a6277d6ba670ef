//! Integration tests for resolution and filtering over real directories.

mod common;

use common::{providers, FileTree};
use provpath::filter::{filter, project};
use provpath::logging::{NullSink, RecordingSink, Severity};
use provpath::provider::ItemKind;
use provpath::{
    BatchPolicy, ErrorKind, Existence, FilterOptions, PathSpec, PathType, ResolveOptions, Resolver,
};

#[test]
fn test_existing_literal_resolves_to_one_item() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);

    let absolute = tree.native("a.txt");
    for raw in ["a.txt", "./docs/../a.txt", absolute.as_str()] {
        let items = resolver
            .resolve(&[PathSpec::literal(raw)], &ResolveOptions::new())
            .unwrap();
        assert_eq!(items.len(), 1, "{raw}");
        assert_eq!(items[0].native(), tree.native("a.txt"));
        assert_eq!(items[0].existence, Existence::Exists);
        assert_eq!(items[0].kind, ItemKind::Leaf);
    }
}

#[test]
fn test_missing_literal_fails_or_synthesizes() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);
    let spec = [PathSpec::literal("missing.txt")];

    let err = resolver.resolve(&spec, &ResolveOptions::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathNotFound);
    let expected = format!(r"Provpath.Core\FileSystem::{}", tree.native("missing.txt"));
    assert_eq!(err.target_path(), Some(expected.as_str()));

    let items = resolver
        .resolve(&spec, &ResolveOptions::new().with_include_non_existent(true))
        .unwrap();
    assert_eq!(items.len(), 1);
    assert!(!items[0].exists());
    assert_eq!(items[0].kind, ItemKind::Unknown);
    assert_eq!(items[0].path.to_string(), expected);
}

#[test]
fn test_unmatched_wildcard_is_empty_and_logged() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let sink = RecordingSink::new();
    let resolver = Resolver::new(&providers, &ctx, &sink);

    for include_non_existent in [false, true] {
        let opts = ResolveOptions::new().with_include_non_existent(include_non_existent);
        let items = resolver.resolve(&[PathSpec::wildcard("*.none")], &opts).unwrap();
        assert!(items.is_empty());
    }

    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.severity == Severity::Info));
}

#[test]
fn test_wildcard_mode_without_metacharacters() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);
    let spec = [PathSpec::wildcard("missing.txt")];

    assert!(resolver.resolve(&spec, &ResolveOptions::new()).unwrap().is_empty());

    let items = resolver
        .resolve(&spec, &ResolveOptions::new().with_include_non_existent(true))
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].existence, Existence::Synthesized);
}

#[test]
fn test_literal_mode_does_not_expand() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);

    let err = resolver
        .resolve(&[PathSpec::literal("*.txt")], &ResolveOptions::new())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_wildcard_results_are_stable() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);
    let spec = [PathSpec::wildcard("*/*")];

    let first = resolver.resolve(&spec, &ResolveOptions::new()).unwrap();
    let second = resolver.resolve(&spec, &ResolveOptions::new()).unwrap();
    assert_eq!(first, second);

    let leaves: Vec<&str> = first.iter().map(|i| i.leaf.as_str()).collect();
    assert_eq!(leaves, vec!["guide.md", "notes.txt", "main.rs"]);
}

#[test]
fn test_force_reveals_hidden_entries() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);
    let spec = [PathSpec::wildcard("*.txt")];

    let plain = resolver.resolve(&spec, &ResolveOptions::new()).unwrap();
    assert_eq!(plain.len(), 2);

    let forced = resolver
        .resolve(&spec, &ResolveOptions::new().with_force(true))
        .unwrap();
    assert_eq!(forced.len(), 3);
    assert!(forced.iter().any(|i| i.leaf == ".hidden.txt"));
}

#[test]
fn test_batch_order_and_fail_fast() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);

    let items = resolver
        .resolve(
            &[PathSpec::literal("b.txt"), PathSpec::wildcard("*.log")],
            &ResolveOptions::new(),
        )
        .unwrap();
    let leaves: Vec<&str> = items.iter().map(|i| i.leaf.as_str()).collect();
    assert_eq!(leaves, vec!["b.txt", "c.log"]);

    let err = resolver
        .resolve(
            &[PathSpec::literal("missing"), PathSpec::literal("b.txt")],
            &ResolveOptions::new(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PathNotFound);
}

#[test]
fn test_continue_on_error_skips_and_warns() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let sink = RecordingSink::new();
    let resolver = Resolver::new(&providers, &ctx, &sink);
    let opts = ResolveOptions::new().with_batch_policy(BatchPolicy::ContinueOnError);

    let items = resolver
        .resolve(
            &[
                PathSpec::literal("missing"),
                PathSpec::literal("b.txt"),
                PathSpec::literal("x"),
            ],
            &opts.clone().with_provider("Certificate"),
        )
        .unwrap();
    assert!(items.is_empty());

    let items = resolver
        .resolve(&[PathSpec::literal("missing"), PathSpec::literal("b.txt")], &opts)
        .unwrap();
    assert_eq!(items.len(), 1);

    let warnings: Vec<_> = sink
        .records()
        .into_iter()
        .filter(|r| r.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 4);
    assert_eq!(warnings[0].kind, Some(ErrorKind::ProviderNotFound));
    assert_eq!(warnings[3].kind, Some(ErrorKind::PathNotFound));
}

#[test]
fn test_registry_and_filesystem_in_one_batch() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);

    let items = resolver
        .resolve(
            &[
                PathSpec::wildcard(r"HKLM:\SOFTWARE\Vendor\*"),
                PathSpec::literal("a.txt"),
            ],
            &ResolveOptions::new(),
        )
        .unwrap();

    let rendered: Vec<String> = items.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            r"Provpath.Core\Registry::HKEY_LOCAL_MACHINE\SOFTWARE\Vendor\App".to_string(),
            r"Provpath.Core\Registry::HKEY_LOCAL_MACHINE\SOFTWARE\Vendor\Tools".to_string(),
            format!(r"Provpath.Core\FileSystem::{}", tree.native("a.txt")),
        ]
    );
}

#[test]
fn test_filter_composition_on_leaf_names() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);

    let items = resolver
        .resolve(&[PathSpec::wildcard("*")], &ResolveOptions::new())
        .unwrap();

    let opts = FilterOptions::new()
        .with_include(["*.txt"])
        .with_exclude(["b.*"]);
    let kept = filter(items.clone(), &opts).unwrap();
    assert_eq!(project(&kept, true), vec![tree.native("a.txt")]);

    let containers = filter(
        items,
        &FilterOptions::new().with_path_type(PathType::Container),
    )
    .unwrap();
    let leaves: Vec<&str> = containers.iter().map(|i| i.leaf.as_str()).collect();
    assert_eq!(leaves, vec!["docs", "src"]);
}

#[test]
fn test_resolve_paths_filters_literal_to_empty() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);

    let paths = resolver
        .resolve_paths(
            &[PathSpec::literal("a.txt")],
            &ResolveOptions::new(),
            &FilterOptions::new().with_exclude(["a.*"]),
        )
        .unwrap();
    assert!(paths.is_empty());
}

#[test]
fn test_resolve_paths_rejects_bad_filter_before_lookup() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);

    let err = resolver
        .resolve_paths(
            &[PathSpec::literal("missing")],
            &ResolveOptions::new(),
            &FilterOptions::new().with_filter("[oops"),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPattern);
}

#[test]
fn test_synthesized_items_survive_any_path_type_only() {
    let tree = FileTree::new();
    let providers = providers();
    let ctx = tree.context();
    let resolver = Resolver::new(&providers, &ctx, &NullSink);
    let opts = ResolveOptions::new()
        .with_include_non_existent(true)
        .with_native_paths(true);
    let spec = [PathSpec::literal("later.txt")];

    let any = resolver
        .resolve_paths(&spec, &opts, &FilterOptions::new())
        .unwrap();
    assert_eq!(any, vec![tree.native("later.txt")]);

    let leaves = resolver
        .resolve_paths(&spec, &opts, &FilterOptions::new().with_path_type(PathType::Leaf))
        .unwrap();
    assert!(leaves.is_empty());
}

#[test]
fn test_bracketed_location_is_literal_for_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("build[1]");
    std::fs::create_dir(&location).unwrap();
    for file in ["a.txt", "b.txt"] {
        std::fs::write(location.join(file), file).unwrap();
    }
    let providers = providers();
    let ctx = provpath::ExecutionContext::new(location.clone());
    let resolver = Resolver::new(&providers, &ctx, &NullSink);
    let native = |name: &str| location.join(name).display().to_string();

    let exact = resolver
        .resolve(&[PathSpec::wildcard("a.txt")], &ResolveOptions::new())
        .unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].native(), native("a.txt"));

    let all = resolver
        .resolve(&[PathSpec::wildcard("*.txt")], &ResolveOptions::new())
        .unwrap();
    let natives: Vec<&str> = all.iter().map(|i| i.native()).collect();
    assert_eq!(natives, vec![native("a.txt"), native("b.txt")]);

    let opts = ResolveOptions::new().with_include_non_existent(true);
    let synthesized = resolver
        .resolve(&[PathSpec::wildcard("new.txt")], &opts)
        .unwrap();
    assert_eq!(synthesized.len(), 1);
    assert_eq!(synthesized[0].existence, Existence::Synthesized);
    assert_eq!(synthesized[0].native(), native("new.txt"));
}

#[test]
fn test_bracketed_location_is_literal_for_registry() {
    let store = std::sync::Arc::new(provpath::provider::MemoryRegistry::from_keys([
        r"HKEY_LOCAL_MACHINE\SOFTWARE\Build[1]\App",
        r"HKEY_LOCAL_MACHINE\SOFTWARE\Build[1]\Tools",
    ]));
    let providers = provpath::ProviderRegistry::with_registry_store(store);
    let tree = FileTree::new();
    let ctx = tree
        .context()
        .with_registry_location(r"HKLM:\SOFTWARE\Build[1]");
    let resolver = Resolver::new(&providers, &ctx, &NullSink);
    let opts = ResolveOptions::new().with_provider("Registry");

    let exact = resolver.resolve(&[PathSpec::wildcard("App")], &opts).unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].native(), r"HKEY_LOCAL_MACHINE\SOFTWARE\Build[1]\App");

    let all = resolver.resolve(&[PathSpec::wildcard("*")], &opts).unwrap();
    let natives: Vec<&str> = all.iter().map(|i| i.native()).collect();
    assert_eq!(
        natives,
        vec![
            r"HKEY_LOCAL_MACHINE\SOFTWARE\Build[1]\App",
            r"HKEY_LOCAL_MACHINE\SOFTWARE\Build[1]\Tools"
        ]
    );

    let synthesized = resolver
        .resolve(
            &[PathSpec::wildcard("New")],
            &opts.clone().with_include_non_existent(true),
        )
        .unwrap();
    assert_eq!(synthesized.len(), 1);
    assert_eq!(synthesized[0].existence, Existence::Synthesized);
    assert_eq!(
        synthesized[0].native(),
        r"HKEY_LOCAL_MACHINE\SOFTWARE\Build[1]\New"
    );
}
