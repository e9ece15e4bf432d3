//! Tests for the progress module: bar styling and the display following a
//! job's progress.

use chunkdl::progress::{ProgressAggregator, ProgressBarOpts, ProgressDisplay};

#[test]
fn test_progress_bar_opts_default() {
    let opts = ProgressBarOpts::default();
    assert!(opts.is_enabled());
    let pb = opts.to_progress_bar(100);
    assert_eq!(pb.length(), Some(100));
}

#[test]
fn test_progress_bar_opts_custom() {
    let opts = ProgressBarOpts::new(
        Some(ProgressBarOpts::TEMPLATE_BYTES.to_string()),
        Some(ProgressBarOpts::CHARS_FADE_IN.to_string()),
        true,
        true,
    );
    assert!(opts.is_enabled());
    let pb = opts.to_progress_bar(42);
    assert_eq!(pb.length(), Some(42));
}

#[test]
fn test_progress_bar_opts_bad_template_falls_back() {
    let opts = ProgressBarOpts::new(Some("{bar:notacolor".to_string()), None, true, false);
    // Building the style must not panic.
    let _style = opts.to_progress_style();
}

#[test]
fn test_progress_bar_opts_hidden() {
    let opts = ProgressBarOpts::hidden();
    assert!(!opts.is_enabled());
    assert!(opts.to_progress_bar(100).is_hidden());
}

#[test]
fn test_progress_bar_opts_set_clear() {
    let mut opts = ProgressBarOpts::with_pip_style();
    opts.set_clear(true);
    let debug = format!("{:?}", opts);
    assert!(debug.contains("clear: true"));
}

#[tokio::test]
async fn test_display_follows_until_job_ends() {
    let (progress, watcher) = ProgressAggregator::new();
    let display = ProgressDisplay::new(ProgressBarOpts::hidden());
    let follow = tokio::spawn(display.follow(watcher));

    progress.set_total(1_000);
    progress.add(600);
    progress.rollback(100);
    progress.add(500);
    drop(progress);

    let last = follow.await.expect("display task should finish");
    assert_eq!(last.transferred, 1_000);
    assert_eq!(last.total, Some(1_000));
}

#[tokio::test]
async fn test_display_mirrors_values_on_bar() {
    let (progress, watcher) = ProgressAggregator::new();
    let display = ProgressDisplay::new(ProgressBarOpts::hidden());
    let bar = display.bar().clone();

    progress.set_total(64);
    progress.add(16);
    drop(progress);
    display.follow(watcher).await;

    assert_eq!(bar.length(), Some(64));
    assert_eq!(bar.position(), 16);
    assert!(bar.is_finished());
}

#[test]
fn test_extra_watchers_see_the_same_value() {
    let (progress, first) = ProgressAggregator::new();
    let second = progress.watch();

    progress.set_total(10);
    progress.add(7);

    assert_eq!(first.current(), second.current());
    assert_eq!(progress.current().transferred, 7);
}
