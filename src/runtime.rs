//! Effect execution on tokio.
//!
//! Requests run on spawned tasks so the event loop never blocks on the
//! network; their results come back over a channel and are applied on the
//! event-loop task, which keeps every mutation of the control single
//! threaded. Commits go straight to the parent's callback.

use std::future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::controller::{Effect, MultiSelect, Response};
use crate::log;
use crate::model::Identifier;
use crate::transport::Transport;

/// Change callback of the hosting parent.
pub type OnChange = Box<dyn FnMut(Vec<Identifier>)>;

pub struct Driver {
    transport: Arc<dyn Transport>,
    tx: mpsc::Sender<Response>,
    rx: mpsc::Receiver<Response>,
    on_change: OnChange,
    outstanding: usize,
}

impl Driver {
    pub fn new(transport: Arc<dyn Transport>, on_change: impl FnMut(Vec<Identifier>) + 'static) -> Self {
        let (tx, rx) = mpsc::channel::<Response>(32);
        Self {
            transport,
            tx,
            rx,
            on_change: Box::new(on_change),
            outstanding: 0,
        }
    }

    /// Number of requests whose responses have not been received yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Carry out effects returned by the control.
    pub fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Request(request) => {
                    self.outstanding += 1;
                    let transport = Arc::clone(&self.transport);
                    let tx = self.tx.clone();
                    tokio::spawn(async move {
                        let result = transport.get(&request.path, &request.query).await;
                        let _ = tx.send(Response { request, result }).await;
                    });
                }
                Effect::Commit(ids) => {
                    log::log_event(&format!("commit: [{}]", join_ids(&ids)));
                    (self.on_change)(ids);
                }
            }
        }
    }

    /// Wait for the next response. Pends forever when nothing is in flight.
    pub async fn next_response(&mut self) -> Response {
        if self.outstanding == 0 {
            return future::pending().await;
        }
        match self.rx.recv().await {
            Some(response) => {
                self.outstanding -= 1;
                response
            }
            // the driver holds a sender, so the channel never closes
            None => future::pending().await,
        }
    }

    /// Apply responses until no request is outstanding.
    pub async fn settle(&mut self, control: &mut MultiSelect) {
        while self.outstanding > 0 {
            let response = self.next_response().await;
            control.on_response(response);
        }
    }
}

/// Resolve once `deadline` passes; pend forever without one.
pub async fn search_due(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

fn join_ids(ids: &[Identifier]) -> String {
    ids.iter().map(Identifier::as_str).collect::<Vec<_>>().join(",")
}
