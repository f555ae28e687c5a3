use std::collections::VecDeque;
use std::sync::Arc;

use dashmap::DashSet;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use mirrorscan_core::{CandidateSet, MirrorKind, ProbeReport, Prober};

/// Probe every candidate of one category over a fixed worker pool and
/// return the subset that answered as valid.
///
/// Workers pull from a shared queue, so the result set does not depend on
/// the pool size. A claim set guarantees each candidate is probed at most
/// once even if the queue ever hands out duplicates.
pub async fn validate_all(
    prober: Arc<dyn Prober>,
    kind: MirrorKind,
    candidates: CandidateSet,
    workers: usize,
) -> CandidateSet {
    if candidates.is_empty() {
        return CandidateSet::new();
    }

    let total = candidates.len();
    let queue: Arc<Mutex<VecDeque<String>>> =
        Arc::new(Mutex::new(candidates.into_iter().collect()));
    let claimed: Arc<DashSet<String>> = Arc::new(DashSet::new());
    let (tx, mut rx) = mpsc::channel::<ProbeReport>(total);

    let pool = workers.max(1).min(total);
    info!(kind = %kind, total, workers = pool, "starting validation");

    let mut handles = Vec::with_capacity(pool);
    for worker_id in 0..pool {
        let queue = Arc::clone(&queue);
        let claimed = Arc::clone(&claimed);
        let prober = Arc::clone(&prober);
        let tx = tx.clone();

        handles.push(tokio::spawn(async move {
            loop {
                let candidate = {
                    let mut q = queue.lock().await;
                    q.pop_front()
                };
                let candidate = match candidate {
                    Some(c) => c,
                    None => break,
                };
                if !claimed.insert(candidate.clone()) {
                    continue;
                }

                let report = prober.probe(kind, &candidate).await;
                debug!(
                    worker = worker_id,
                    url = %report.url,
                    status = %report.status,
                    "candidate classified"
                );
                if tx.send(report).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx);

    let mut valid = CandidateSet::new();
    let mut rejected = 0usize;
    while let Some(report) = rx.recv().await {
        if report.valid {
            valid.insert(report.url);
        } else {
            rejected += 1;
        }
    }

    for handle in handles {
        if let Err(e) = handle.await {
            warn!(error = %e, "probe worker panicked");
        }
    }

    info!(kind = %kind, valid = valid.len(), rejected, "validation finished");
    valid
}
