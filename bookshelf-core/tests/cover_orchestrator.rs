use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use bookshelf_core::covers::{
    CoverFetchError, CoverOrchestrator, CoverSource, FetchTarget,
    RemoteCallError, TargetPlan, TerminalState,
};
use bookshelf_model::{BookCover, BookID};
use reqwest::StatusCode;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
enum Script {
    Succeed(u64),
    Fail(u64),
    Panic,
}

/// Cover source whose per-target behaviour is fixed up front. Targets flagged
/// with `return_fault` fail after `fault_delay`, like the real service.
#[derive(Debug)]
struct ScriptedSource {
    scripts: HashMap<usize, Script>,
    fallback: Script,
    fault_delay: u64,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl ScriptedSource {
    fn uniform(script: Script) -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: script,
            fault_delay: 500,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    fn with(mut self, index: usize, script: Script) -> Self {
        self.scripts.insert(index, script);
        self
    }
}

#[async_trait]
impl CoverSource for ScriptedSource {
    async fn download(
        &self,
        target: &FetchTarget,
    ) -> Result<BookCover, RemoteCallError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let script = if target.return_fault {
            Script::Fail(self.fault_delay)
        } else {
            self.scripts.get(&target.index).copied().unwrap_or(self.fallback)
        };

        let result = match script {
            Script::Succeed(ms) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok(BookCover::new(target.cover_id.clone(), vec![target.index as u8]))
            }
            Script::Fail(ms) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Err(RemoteCallError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                })
            }
            Script::Panic => panic!("scripted panic for {}", target.cover_id),
        };
        self.completed.fetch_add(1, Ordering::SeqCst);
        result
    }
}

fn orchestrator(
    source: ScriptedSource,
    plan: TargetPlan,
) -> (CoverOrchestrator, Arc<ScriptedSource>) {
    let source = Arc::new(source);
    (CoverOrchestrator::new(source.clone(), plan), source)
}

#[tokio::test(start_paused = true)]
async fn all_successful_targets_come_back_in_target_order() {
    let source = ScriptedSource::uniform(Script::Succeed(10))
        .with(0, Script::Succeed(200))
        .with(1, Script::Succeed(120))
        .with(2, Script::Succeed(40))
        .with(3, Script::Succeed(160))
        .with(4, Script::Succeed(80));
    let (orchestrator, _) = orchestrator(source, TargetPlan::new(5));
    let book_id = BookID::new();

    let started = Instant::now();
    let covers = orchestrator.fetch_all(&book_id).await.expect("no failures");
    let elapsed = started.elapsed();

    let names: Vec<String> = covers.iter().map(|c| c.name.clone()).collect();
    let expected: Vec<String> = (1..=5)
        .map(|k| format!("{book_id}-dummycover{k}"))
        .collect();
    assert_eq!(names, expected);
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(300), "took {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn total_latency_tracks_slowest_download_not_the_sum() {
    let (orchestrator, source) =
        orchestrator(ScriptedSource::uniform(Script::Succeed(1_000)), TargetPlan::new(8));

    let started = Instant::now();
    let covers = orchestrator.fetch_all(&BookID::new()).await.unwrap();

    assert_eq!(covers.len(), 8);
    assert_eq!(source.started.load(Ordering::SeqCst), 8);
    assert!(started.elapsed() < Duration::from_millis(1_500));
}

#[tokio::test(start_paused = true)]
async fn fault_target_cancels_siblings_and_keeps_earlier_covers() {
    let source = ScriptedSource::uniform(Script::Succeed(2_000))
        .with(0, Script::Succeed(100))
        .with(2, Script::Succeed(300))
        .with(3, Script::Succeed(800));
    let (orchestrator, source) = orchestrator(source, TargetPlan::default());
    let book_id = BookID::new();

    let started = Instant::now();
    let err = orchestrator
        .fetch_all(&book_id)
        .await
        .expect_err("request #2 is faulted");
    let elapsed = started.elapsed();

    let CoverFetchError::AggregateCancelled(aggregate) = err else {
        panic!("expected an aggregate cancellation, got {err:?}");
    };
    assert_eq!(aggregate.cause.index, 1);
    assert_eq!(aggregate.cause.cover_id, format!("{book_id}-dummycover2"));

    let retained: Vec<&str> =
        aggregate.retained.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        retained,
        vec![
            format!("{book_id}-dummycover1"),
            format!("{book_id}-dummycover3")
        ]
    );

    let states: Vec<TerminalState> =
        aggregate.reports.iter().map(|r| r.state).collect();
    assert_eq!(
        states,
        vec![
            TerminalState::Succeeded,
            TerminalState::FailedSoft,
            TerminalState::Succeeded,
            TerminalState::AbortedByCancellation,
            TerminalState::AbortedByCancellation,
        ]
    );
    assert!(aggregate.reports[1].error.is_some());

    // bounded by the failing request, not by the 2s stragglers
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_millis(800), "took {elapsed:?}");

    // abandoned downloads were dropped, not left running
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(source.completed.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn single_failing_target_reports_one_missing_cover() {
    let (orchestrator, _) =
        orchestrator(ScriptedSource::uniform(Script::Fail(0)), TargetPlan::new(1));

    let err = orchestrator.fetch_all(&BookID::new()).await.unwrap_err();

    let CoverFetchError::AggregateCancelled(aggregate) = err else {
        panic!("expected an aggregate cancellation");
    };
    assert_eq!(aggregate.cause.index, 0);
    assert!(aggregate.retained.is_empty());
    assert_eq!(aggregate.reports.len(), 1);
    assert_eq!(aggregate.reports[0].state, TerminalState::FailedSoft);
}

#[tokio::test(start_paused = true)]
async fn first_failure_wins_when_several_targets_fail() {
    let source = ScriptedSource::uniform(Script::Succeed(50))
        .with(1, Script::Fail(300))
        .with(3, Script::Fail(100));
    let (orchestrator, _) = orchestrator(source, TargetPlan::new(5));

    let err = orchestrator.fetch_all(&BookID::new()).await.unwrap_err();

    let CoverFetchError::AggregateCancelled(aggregate) = err else {
        panic!("expected an aggregate cancellation");
    };
    assert_eq!(aggregate.cause.index, 3);
    assert_eq!(aggregate.retained.len(), 3);
    assert_eq!(aggregate.reports[1].state, TerminalState::AbortedByCancellation);
    assert_eq!(aggregate.reports[3].state, TerminalState::FailedSoft);
}

#[tokio::test(start_paused = true)]
async fn each_call_gets_a_fresh_cancellation_signal() {
    let source = ScriptedSource::uniform(Script::Succeed(10));
    let (orchestrator, _) =
        orchestrator(source, TargetPlan::new(3).with_fault_target(Some(1)));
    let healthy = CoverOrchestrator::new(
        Arc::new(ScriptedSource::uniform(Script::Succeed(10))),
        TargetPlan::new(3),
    );

    let book_id = BookID::new();
    assert!(orchestrator.fetch_all(&book_id).await.is_err());
    assert!(orchestrator.fetch_all(&book_id).await.is_err());
    assert_eq!(healthy.fetch_all(&book_id).await.unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn panicking_download_surfaces_as_unexpected() {
    let source = ScriptedSource::uniform(Script::Succeed(5_000))
        .with(2, Script::Panic);
    let (orchestrator, source) = orchestrator(source, TargetPlan::new(4));

    let err = orchestrator.fetch_all(&BookID::new()).await.unwrap_err();

    match err {
        CoverFetchError::Unexpected {
            index,
            reports,
            source: join_error,
            ..
        } => {
            assert_eq!(index, 2);
            assert!(join_error.is_panic());
            assert_eq!(reports.len(), 4);
            assert!(reports.iter().all(|r| r.state == TerminalState::Incomplete));
        }
        other => panic!("expected an unexpected fault, got {other:?}"),
    }

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(source.completed.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn single_cover_lookup_maps_failure_to_none() {
    let source = ScriptedSource::uniform(Script::Succeed(10)).with(0, Script::Fail(10));
    let (failing, _) = orchestrator(source, TargetPlan::new(1));
    let (working, _) =
        orchestrator(ScriptedSource::uniform(Script::Succeed(10)), TargetPlan::new(1));

    assert!(failing.fetch_cover("missing").await.is_none());
    let cover = working.fetch_cover("found").await.expect("cover");
    assert_eq!(cover.name, "found");
}
