//! Library-level behavior tests for the traversal engine.

use std::io;

use fscout::test_utils::TestTree;
use fscout::{
    PathKind, PathRecord, RecordSink, SearchConfig, SearchError, SearchOutcome, SearchWalker,
    WalkStats,
};

fn run(config: SearchConfig) -> SearchOutcome {
    SearchWalker::new(config).execute().expect("search failed")
}

fn config_for(tree: &TestTree) -> SearchConfig {
    SearchConfig {
        root_path: tree.path().to_path_buf(),
        ..Default::default()
    }
}

/// The scenario tree: `a.txt` (100 bytes) at the root, `sub/b.txt`
/// (50 bytes) one level down.
fn scenario_tree() -> TestTree {
    let tree = TestTree::new();
    tree.add_file_with_size("a.txt", 100);
    tree.add_file_with_size("sub/b.txt", 50);
    tree
}

#[test]
fn test_default_config_marks_everything_matched() {
    // Vacuous-exclude property: empty exclude list means every path is
    // exclude-clean, so the default configuration (return_all = false!)
    // still emits everything, each record marked a match.
    let tree = scenario_tree();
    let outcome = run(config_for(&tree));

    assert_eq!(outcome.records.len(), 4);
    for record in &outcome.records {
        assert_eq!(record.search_match, Some(true), "{}", record.full_path);
    }
}

#[test]
fn test_recursive_scenario_emits_four_records() {
    let tree = scenario_tree();
    let outcome = run(config_for(&tree));

    let names: Vec<&str> = outcome
        .records
        .iter()
        .map(|r| {
            r.file_name
                .as_deref()
                .or(r.folder_name.as_deref())
                .unwrap()
        })
        .collect();
    // Walk order: folder first, then its direct files, then subtrees.
    let root_name = names[0];
    assert_eq!(&names[1..], &["a.txt", "sub", "b.txt"]);

    let root = &outcome.records[0];
    assert_eq!(root.kind, PathKind::Folder);
    assert_eq!(root.folder_name.as_deref(), Some(root_name));
    assert_eq!(root.size_bytes, 100, "only direct children count");
    assert_eq!(root.file_count, 1);

    let sub = &outcome.records[2];
    assert_eq!(sub.kind, PathKind::Folder);
    assert_eq!(sub.size_bytes, 50);
    assert_eq!(sub.file_count, 1);
}

#[test]
fn test_non_recursive_emits_only_root_and_its_files() {
    let tree = scenario_tree();
    let config = SearchConfig {
        recursive: false,
        ..config_for(&tree)
    };
    let outcome = run(config);

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].kind, PathKind::Folder);
    assert_eq!(outcome.records[0].size_bytes, 100);
    assert_eq!(outcome.records[0].file_count, 1);
    assert_eq!(outcome.records[1].file_name.as_deref(), Some("a.txt"));
}

#[test]
fn test_folder_size_excludes_nested_descendants() {
    let tree = TestTree::new();
    tree.add_file_with_size("small.txt", 10);
    tree.add_file_with_size("sub/big.txt", 10_000);
    tree.add_file_with_size("sub/deeper/huge.txt", 50_000);

    let outcome = run(config_for(&tree));
    let root = &outcome.records[0];
    assert_eq!(root.size_bytes, 10, "nested files must not roll up");

    let sub = outcome
        .records
        .iter()
        .find(|r| r.folder_name.as_deref() == Some("sub"))
        .unwrap();
    assert_eq!(sub.size_bytes, 10_000);
    assert_eq!(sub.file_count, 1);
}

#[test]
fn test_exclude_filters_out_matching_paths() {
    let tree = TestTree::new();
    tree.add_file("src/main.rs", "fn main() {}");
    tree.add_file("node_modules/pkg/index.js", "module.exports = {}");

    let config = SearchConfig {
        exclude: vec!["NODE_MODULES".to_string()],
        ..config_for(&tree)
    };
    let outcome = run(config);

    assert!(
        outcome
            .records
            .iter()
            .all(|r| !r.full_path.to_lowercase().contains("node_modules")),
        "excluded paths must not be emitted"
    );
    assert!(
        outcome
            .records
            .iter()
            .any(|r| r.file_name.as_deref() == Some("main.rs"))
    );
}

#[test]
fn test_return_all_emits_non_matches_flagged() {
    let tree = TestTree::new();
    tree.add_file("src/main.rs", "fn main() {}");
    tree.add_file("node_modules/pkg/index.js", "module.exports = {}");

    let config = SearchConfig {
        exclude: vec!["node_modules".to_string()],
        return_all: true,
        ..config_for(&tree)
    };
    let outcome = run(config);

    let excluded: Vec<&PathRecord> = outcome
        .records
        .iter()
        .filter(|r| r.full_path.contains("node_modules"))
        .collect();
    assert!(!excluded.is_empty(), "return_all keeps non-matches");
    for record in excluded {
        assert_eq!(record.search_match, Some(false));
    }
}

#[test]
fn test_file_count_sum_matches_files_visited() {
    let tree = TestTree::new();
    tree.add_file("a.txt", "1");
    tree.add_file("b.txt", "22");
    tree.add_file("sub/c.txt", "333");
    tree.add_file("sub/inner/d.txt", "4444");

    let config = SearchConfig {
        return_all: true,
        ..config_for(&tree)
    };
    let outcome = run(config);

    let sum: u64 = outcome
        .records
        .iter()
        .filter(|r| r.is_file())
        .map(|r| r.file_count)
        .sum();
    assert_eq!(sum, outcome.stats.files as u64);
    assert_eq!(sum, 4);
}

#[test]
fn test_size_views_track_byte_count() {
    let tree = scenario_tree();
    let outcome = run(config_for(&tree));

    for record in &outcome.records {
        let bytes = record.size_bytes as f64;
        assert!((record.size_kb - bytes / 1024.0).abs() <= 0.001, "{record:?}");
        assert!(
            (record.size_mb - bytes / (1024.0 * 1024.0)).abs() <= 0.001,
            "{record:?}"
        );
    }
}

#[test]
fn test_hidden_entries_are_flagged_not_skipped() {
    let tree = TestTree::new();
    tree.add_file(".gitignore", "target/");
    tree.add_file("gitignore", "not hidden");

    let outcome = run(config_for(&tree));
    let hidden = outcome
        .records
        .iter()
        .find(|r| r.file_name.as_deref() == Some(".gitignore"))
        .unwrap();
    let plain = outcome
        .records
        .iter()
        .find(|r| r.file_name.as_deref() == Some("gitignore"))
        .unwrap();
    assert!(hidden.is_hidden);
    assert!(!plain.is_hidden);
}

#[test]
fn test_empty_directory_record() {
    let tree = TestTree::new();
    tree.add_dir("empty");

    let outcome = run(config_for(&tree));
    let empty = outcome
        .records
        .iter()
        .find(|r| r.folder_name.as_deref() == Some("empty"))
        .unwrap();
    assert_eq!(empty.size_bytes, 0);
    assert_eq!(empty.file_count, 0);
}

#[test]
fn test_parallel_matches_sequential_output() {
    let tree = TestTree::new();
    for d in 0..3 {
        for f in 0..4usize {
            tree.add_file_with_size(&format!("dir{d}/file{f}.txt"), 10 * (f + 1));
        }
    }

    let sequential = run(config_for(&tree));
    for workers in [0, 2] {
        let parallel = run(SearchConfig {
            parallel_workers: workers,
            ..config_for(&tree)
        });

        let seq: Vec<(&str, u64, u64)> = sequential
            .records
            .iter()
            .map(|r| (r.full_path.as_str(), r.size_bytes, r.file_count))
            .collect();
        let par: Vec<(&str, u64, u64)> = parallel
            .records
            .iter()
            .map(|r| (r.full_path.as_str(), r.size_bytes, r.file_count))
            .collect();
        assert_eq!(seq, par, "workers={workers} must replay sequential order");
        assert_eq!(sequential.stats, parallel.stats);
    }
}

#[test]
fn test_missing_root_is_fatal() {
    let tree = TestTree::new();
    let config = SearchConfig {
        root_path: tree.path().join("does-not-exist"),
        ..Default::default()
    };
    match SearchWalker::new(config).execute() {
        Err(SearchError::RootUnavailable { path, .. }) => {
            assert!(path.ends_with("does-not-exist"));
        }
        other => panic!("expected RootUnavailable, got {other:?}"),
    }
}

#[test]
fn test_file_root_is_invalid_configuration() {
    let tree = TestTree::new();
    let file = tree.add_file("plain.txt", "data");
    let config = SearchConfig {
        root_path: file,
        ..Default::default()
    };
    match SearchWalker::new(config).execute() {
        Err(SearchError::InvalidConfiguration(msg)) => {
            assert!(msg.contains("not a directory"), "{msg}");
        }
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn test_raised_cancel_flag_aborts_the_walk() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    let tree = scenario_tree();
    let flag = Arc::new(AtomicBool::new(false));
    flag.store(true, Ordering::Relaxed);

    let walker = SearchWalker::new(config_for(&tree)).with_cancel_flag(Arc::clone(&flag));
    match walker.execute() {
        Err(SearchError::Cancelled) => {}
        other => panic!("expected Cancelled, got {other:?}"),
    }
}

/// Sink that records emission order and the final stats callback.
#[derive(Default)]
struct ProbeSink {
    paths: Vec<String>,
    finished: Option<WalkStats>,
}

impl RecordSink for ProbeSink {
    fn record(&mut self, record: PathRecord) -> io::Result<()> {
        self.paths.push(record.full_path);
        Ok(())
    }

    fn finish(&mut self, stats: &WalkStats) -> io::Result<()> {
        self.finished = Some(*stats);
        Ok(())
    }
}

#[test]
fn test_streaming_sink_receives_walk_order_and_stats() {
    let tree = scenario_tree();
    let walker = SearchWalker::new(config_for(&tree));

    let mut sink = ProbeSink::default();
    let stats = walker.execute_streaming(&mut sink).unwrap();

    assert_eq!(sink.paths.len(), 4);
    assert!(sink.paths[1].ends_with("a.txt"));
    assert!(sink.paths[3].ends_with("b.txt"));
    assert_eq!(sink.finished, Some(stats));
    assert_eq!(stats.folders, 2);
    assert_eq!(stats.files, 2);
    assert_eq!(stats.skipped, 0);
}
