use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use super::backend::ProcessingBackend;
use super::request::{EditParams, EditState, EditStatus, RequestId};
use crate::error::{ReaperError, Result};
use crate::source::EncodedImage;

/// Called from the worker thread after each result is queued, so the owner
/// can wake up and [`EditDispatcher::poll`].
pub type WakeFn = Arc<dyn Fn() + Send + Sync>;

enum EditCommand {
    Run {
        id: RequestId,
        image: Arc<EncodedImage>,
        params: EditParams,
    },
}

struct EditOutcome {
    id: RequestId,
    result: std::result::Result<EncodedImage, String>,
}

/// Runs backend calls off the caller's thread, one at a time per view.
///
/// The caller owns the [`EditState`]; the worker only ever sees immutable
/// inputs and reports back through a channel, so a result is never applied
/// to a state it was not issued from.
pub struct EditDispatcher {
    state: EditState,
    cmd_tx: mpsc::Sender<EditCommand>,
    result_rx: mpsc::Receiver<EditOutcome>,
}

impl EditDispatcher {
    /// Spawn the worker thread that owns `backend`.
    pub fn spawn<B: ProcessingBackend>(backend: Arc<B>, name: &str, wake: WakeFn) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EditCommand>();
        let (result_tx, result_rx) = mpsc::channel::<EditOutcome>();

        std::thread::Builder::new()
            .name(format!("reaper-{name}"))
            .spawn(move || worker_loop(backend, cmd_rx, result_tx, wake))?;

        Ok(Self {
            state: EditState::default(),
            cmd_tx,
            result_rx,
        })
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn status(&self) -> &EditStatus {
        self.state.status()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Queue one backend call. Returns `None`, issuing nothing, while a
    /// request is in flight or a result is shown.
    pub fn submit(&mut self, image: Arc<EncodedImage>, params: EditParams) -> Option<RequestId> {
        let id = self.state.begin(params.clone())?;
        if self.cmd_tx.send(EditCommand::Run { id, image, params }).is_err() {
            warn!(%id, "edit worker is gone");
            self.state.resolve(id, Err(worker_stopped()));
        }
        Some(id)
    }

    /// Apply every result that has arrived. Returns true when the status
    /// changed. A worker that has exited fails the pending request.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.result_rx.try_recv() {
                Ok(outcome) => changed |= self.state.resolve(outcome.id, outcome.result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if let Some(id) = self.state.pending_id() {
                        warn!(%id, "edit worker exited with a request in flight");
                        changed |= self.state.resolve(id, Err(worker_stopped()));
                    }
                    break;
                }
            }
        }
        changed
    }

    /// Drop any result or error. A request still in flight will be
    /// discarded when it lands.
    pub fn clear(&mut self) {
        self.state.clear();
    }
}

fn worker_loop<B: ProcessingBackend>(
    backend: Arc<B>,
    cmd_rx: mpsc::Receiver<EditCommand>,
    tx: mpsc::Sender<EditOutcome>,
    wake: WakeFn,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            EditCommand::Run { id, image, params } => {
                let start = Instant::now();
                let result =
                    match panic::catch_unwind(AssertUnwindSafe(|| backend.run(&image, &params))) {
                        Ok(result) => result.map_err(|e| e.to_string()),
                        Err(payload) => {
                            warn!(%id, kind = %params.kind(), "backend panicked");
                            Err(ReaperError::Operation(panic_message(payload.as_ref())).to_string())
                        }
                    };
                debug!(
                    %id,
                    kind = %params.kind(),
                    ok = result.is_ok(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "backend call finished"
                );
                if tx.send(EditOutcome { id, result }).is_err() {
                    // Dispatcher dropped; nobody is listening any more.
                    break;
                }
                wake();
            }
        }
    }
}

fn worker_stopped() -> String {
    ReaperError::Operation("processing worker stopped unexpectedly".into()).to_string()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("backend panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("backend panicked: {s}")
    } else {
        "backend panicked".to_string()
    }
}
