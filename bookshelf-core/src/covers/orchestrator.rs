use std::{collections::HashMap, fmt, sync::Arc, time::Duration};

use bookshelf_model::{BookCover, BookID};
use tokio::{task::JoinSet, time::Instant};
use tracing::{debug, info, warn};

use super::{
    cancellation::CancellationController,
    error::{CancelledAggregate, CoverFetchError},
    fetcher::{CoverSource, fetch_one},
    outcome::{FetchOutcome, FetchReport, TerminalState, millis},
    target::{FetchTarget, TargetPlan},
};

type Finished = (usize, FetchOutcome, Duration);

/// Downloads every cover of a book concurrently.
#[derive(Clone)]
pub struct CoverOrchestrator {
    source: Arc<dyn CoverSource>,
    plan: TargetPlan,
}

impl fmt::Debug for CoverOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverOrchestrator")
            .field("source", &self.source)
            .field("cover_count", &self.plan.count())
            .field("fault_target", &self.plan.fault_target())
            .finish()
    }
}

impl CoverOrchestrator {
    pub fn new(source: Arc<dyn CoverSource>, plan: TargetPlan) -> Self {
        Self { source, plan }
    }

    pub fn plan(&self) -> TargetPlan {
        self.plan
    }

    /// Download all covers of `book_id`.
    ///
    /// Every download runs in its own task and all of them are joined before
    /// this returns. Covers come back in target order, not completion order.
    ///
    /// The first failed download cancels the rest and the call returns
    /// [`CoverFetchError::AggregateCancelled`], which keeps the covers that
    /// had already arrived. A download task that dies without an outcome
    /// aborts its siblings and surfaces as [`CoverFetchError::Unexpected`].
    pub async fn fetch_all(
        &self,
        book_id: &BookID,
    ) -> Result<Vec<BookCover>, CoverFetchError> {
        let targets = self.plan.targets(book_id);
        let controller = CancellationController::new();
        let started = Instant::now();

        let mut tasks: JoinSet<Finished> = JoinSet::new();
        let mut task_index = HashMap::with_capacity(targets.len());
        for target in &targets {
            let source = Arc::clone(&self.source);
            let controller = controller.clone();
            let target = target.clone();
            let index = target.index;
            let handle = tasks.spawn(async move {
                let began = Instant::now();
                let outcome =
                    fetch_one(source.as_ref(), &target, &controller).await;
                (target.index, outcome, began.elapsed())
            });
            task_index.insert(handle.id(), index);
        }

        let mut finished: Vec<Option<(FetchOutcome, Duration)>> =
            targets.iter().map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome, elapsed)) => {
                    if let Some(slot) = finished.get_mut(index) {
                        *slot = Some((outcome, elapsed));
                    }
                }
                Err(source) => {
                    tasks.abort_all();
                    while let Some(joined) = tasks.join_next().await {
                        if let Ok((index, outcome, elapsed)) = joined
                            && let Some(slot) = finished.get_mut(index)
                        {
                            *slot = Some((outcome, elapsed));
                        }
                    }

                    let index = task_index
                        .get(&source.id())
                        .copied()
                        .unwrap_or_default();
                    let cover_id = targets
                        .get(index)
                        .map(|target| target.cover_id.clone())
                        .unwrap_or_default();
                    let (reports, _) = collate(&targets, finished);
                    warn!(
                        %book_id,
                        %cover_id,
                        error = %source,
                        "Cover download task failed unexpectedly; aborted remaining downloads"
                    );
                    log_reports(book_id, &reports);
                    return Err(CoverFetchError::Unexpected {
                        index,
                        cover_id,
                        reports,
                        source,
                    });
                }
            }
        }

        let (reports, covers) = collate(&targets, finished);
        let elapsed_ms = millis(started.elapsed());

        match controller.cause().cloned() {
            None => {
                for report in &reports {
                    debug!(
                        %book_id,
                        cover_id = %report.cover_id,
                        state = %report.state,
                        elapsed_ms = millis(report.elapsed),
                        "Cover download finished"
                    );
                }
                info!(
                    %book_id,
                    covers = covers.len(),
                    elapsed_ms,
                    "Fetched book covers"
                );
                Ok(covers)
            }
            Some(cause) => {
                log_reports(book_id, &reports);
                warn!(
                    %book_id,
                    %cause,
                    retained = covers.len(),
                    requested = targets.len(),
                    elapsed_ms,
                    "Cover downloads cancelled"
                );
                Err(CoverFetchError::AggregateCancelled(CancelledAggregate {
                    cause,
                    reports,
                    retained: covers,
                }))
            }
        }
    }

    /// Download a single cover by id. Any failure reads as "no cover".
    pub async fn fetch_cover(&self, cover_id: &str) -> Option<BookCover> {
        let target = FetchTarget::new(0, cover_id);
        match self.source.download(&target).await {
            Ok(cover) => Some(cover),
            Err(err) => {
                warn!(%cover_id, error = %err, "Cover download failed");
                None
            }
        }
    }
}

fn collate(
    targets: &[FetchTarget],
    finished: Vec<Option<(FetchOutcome, Duration)>>,
) -> (Vec<FetchReport>, Vec<BookCover>) {
    let mut reports = Vec::with_capacity(targets.len());
    let mut covers = Vec::new();

    for (target, slot) in targets.iter().zip(finished) {
        let (state, elapsed, error) = match slot {
            Some((outcome, elapsed)) => {
                let state = outcome.state();
                let error = match outcome {
                    FetchOutcome::Succeeded(cover) => {
                        covers.push(cover);
                        None
                    }
                    FetchOutcome::FailedSoft(err) => Some(err.to_string()),
                    FetchOutcome::AbortedByCancellation => None,
                };
                (state, elapsed, error)
            }
            None => (TerminalState::Incomplete, Duration::ZERO, None),
        };
        reports.push(FetchReport {
            index: target.index,
            cover_id: target.cover_id.clone(),
            state,
            elapsed,
            error,
        });
    }

    (reports, covers)
}

fn log_reports(book_id: &BookID, reports: &[FetchReport]) {
    for report in reports {
        info!(
            %book_id,
            cover_id = %report.cover_id,
            state = %report.state,
            elapsed_ms = millis(report.elapsed),
            error = report.error.as_deref().unwrap_or(""),
            "Cover download finished"
        );
    }
}
