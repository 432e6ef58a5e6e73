// tests/fs_abstraction.rs
//
// Engine discovery running entirely against the in-memory filesystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gowatch::engine::Watcher;
use gowatch::errors::GowatchError;
use gowatch::fs::mock::MockFileSystem;
use gowatch::watch::{watch_channels, ChangeEvent, PathFilter};
use gowatch_test_utils::{init_tracing, wait_until, with_timeout, FakeApp, FakeWatchResource};

fn mock_project() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_file("/proj/main.go");
    fs.add_file("/proj/internal/db/db.go");
    fs.add_file("/proj/cmd/tool/main.go");
    fs.add_dir("/proj/empty");
    fs
}

#[tokio::test]
async fn initial_watch_set_comes_from_the_injected_filesystem() {
    init_tracing();
    let fs = mock_project();
    let (watch, log) = FakeWatchResource::new();
    let (senders, streams) = watch_channels();

    let mut watcher = Watcher::new(
        "/proj",
        ".go",
        PathFilter::new::<_, &str>([]).unwrap(),
        FakeApp::new(),
        watch,
        streams,
    )
    .with_file_system(Arc::new(fs.clone()));
    let stop = watcher.stop_handle();
    let task = tokio::spawn(async move {
        let outcome = watcher.run().await;
        (outcome, watcher)
    });

    let watching = log.clone();
    wait_until("initial subscription", || watching.added().len() == 6).await;

    let mut added = log.added();
    added.sort();
    let expected: Vec<PathBuf> = [
        "/proj",
        "/proj/cmd",
        "/proj/cmd/tool",
        "/proj/empty",
        "/proj/internal",
        "/proj/internal/db",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(added, expected);

    // A new subtree shows up in the mock and is reported as created.
    fs.add_file("/proj/api/v1/handler.go");
    senders
        .events
        .send(ChangeEvent::created("/proj/api"))
        .unwrap();
    let extended = log.clone();
    wait_until("new subtree watched", || {
        extended.is_watching(Path::new("/proj/api/v1"))
    })
    .await;

    stop.stop();
    let (outcome, watcher) = with_timeout(task).await.unwrap();
    outcome.unwrap();
    assert_eq!(watcher.watch_set().len(), 8);
}

#[tokio::test]
async fn unreadable_directory_during_startup_is_fatal() {
    init_tracing();
    let fs = mock_project();
    fs.break_path("/proj/internal/db");
    let (watch, log) = FakeWatchResource::new();
    let (_senders, streams) = watch_channels();
    let app = FakeApp::new();

    let mut watcher = Watcher::new(
        "/proj",
        ".go",
        PathFilter::new::<_, &str>([]).unwrap(),
        app.clone(),
        watch,
        streams,
    )
    .with_file_system(Arc::new(fs));

    let err = with_timeout(watcher.run()).await.unwrap_err();
    match err {
        GowatchError::Traversal { path, .. } => assert_eq!(path, Path::new("/proj/internal/db")),
        other => panic!("expected Traversal error, got {other:?}"),
    }
    assert!(log.added().is_empty());
    assert_eq!(log.close_count(), 1);
    assert_eq!(app.shutdown_count(), 1);
}

#[tokio::test]
async fn unreadable_directory_in_created_subtree_is_fatal() {
    init_tracing();
    let fs = mock_project();
    let (watch, log) = FakeWatchResource::new();
    let (senders, streams) = watch_channels();
    let app = FakeApp::new();

    let mut watcher = Watcher::new(
        "/proj",
        ".go",
        PathFilter::new::<_, &str>([]).unwrap(),
        app.clone(),
        watch,
        streams,
    )
    .with_file_system(Arc::new(fs.clone()));
    let task = tokio::spawn(async move { watcher.run().await });

    let watching = log.clone();
    wait_until("initial subscription", || watching.added().len() == 6).await;

    fs.add_dir("/proj/new/locked");
    fs.break_path("/proj/new/locked");
    senders
        .events
        .send(ChangeEvent::created("/proj/new"))
        .unwrap();

    let outcome = with_timeout(task).await.unwrap();
    match outcome {
        Err(GowatchError::Traversal { path, .. }) => {
            assert_eq!(path, Path::new("/proj/new/locked"))
        }
        other => panic!("expected Traversal error, got {other:?}"),
    }
    assert!(!log.is_watching(Path::new("/proj/new")));
    assert_eq!(app.shutdown_count(), 1);
    assert_eq!(log.close_count(), 1);
}
