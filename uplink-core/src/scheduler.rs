use crate::service::ParentService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Fixed-delay driver for the discovery pipeline.
///
/// A new cycle never starts before the prior one finishes: the delay timer
/// only starts once `run_cycle` returns. Shutdown is cooperative and takes
/// effect between cycles; an in-flight cycle is allowed to complete.
pub struct Scheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Scheduler {
    pub fn start(service: Arc<ParentService>, initial_delay: Duration, delay: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);

        let handle = tokio::spawn(async move {
            info!(?initial_delay, ?delay, "scheduler: started");

            tokio::select! {
                _ = tokio::time::sleep(initial_delay) => {}
                _ = stop.changed() => {
                    info!("scheduler: stopped before first cycle");
                    return;
                }
            }

            loop {
                // run_cycle blocks on catalog reads; keep it off the executor.
                let svc = Arc::clone(&service);
                match tokio::task::spawn_blocking(move || svc.run_cycle()).await {
                    Ok(Ok(summary)) => info!(
                        cycle = summary.cycle,
                        nodes = summary.nodes,
                        gateways = summary.gateways,
                        parents = summary.parents,
                        "scheduler: cycle complete"
                    ),
                    Ok(Err(e)) => {
                        warn!(error = %e, "scheduler: cycle failed, previous parent map stays published")
                    }
                    Err(e) => warn!(error = %e, "scheduler: cycle task panicked"),
                }

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = stop.changed() => {
                        info!("scheduler: stopping");
                        return;
                    }
                }
            }
        });

        Self { shutdown, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal shutdown and wait for the task to wind down.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
