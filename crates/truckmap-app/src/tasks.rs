//! Background work: geolocation lookups and photo batches
//!
//! Workers run on plain threads and report back over a channel. The owner
//! drains completions with [`TaskRunner::poll`] and feeds them to the
//! context, which drops any whose ticket has gone stale.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};
use truckmap_vision::{ingest_paths, PhotoConfig};

use crate::context::{Event, Ticket};
use crate::geolocation::{locate_with_timeout, GeolocationSource};

/// Called from worker threads after each completion, e.g. to request a repaint
pub type Waker = Arc<dyn Fn() + Send + Sync>;

pub struct TaskRunner {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
    waker: Option<Waker>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            waker: None,
        }
    }

    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self
    }

    fn worker(&self) -> (Sender<Event>, Option<Waker>) {
        (self.sender.clone(), self.waker.clone())
    }

    pub fn spawn_geolocation(
        &self,
        ticket: Ticket,
        source: Arc<dyn GeolocationSource>,
        timeout: Duration,
    ) {
        let (tx, waker) = self.worker();
        thread::spawn(move || {
            let result = locate_with_timeout(source, timeout);
            debug!(?ticket, ok = result.is_ok(), "geolocation finished");
            if tx.send(Event::LocationResolved(ticket, result)).is_ok() {
                wake(&waker);
            }
        });
    }

    /// Process `paths` in order, delivering each photo as soon as it is ready
    pub fn spawn_photo_batch(&self, ticket: Ticket, paths: Vec<PathBuf>, config: PhotoConfig) {
        let (tx, waker) = self.worker();
        let total = paths.len();
        thread::spawn(move || {
            let mut delivered = 0;
            for photo in ingest_paths(paths, config) {
                if tx.send(Event::PhotoIngested(ticket, photo)).is_err() {
                    return;
                }
                delivered += 1;
                wake(&waker);
            }
            info!(delivered, total, "photo batch finished");
        });
    }

    /// Completed work, in arrival order
    pub fn poll(&self) -> Vec<Event> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// Block until one completion arrives or `timeout` passes
    pub fn wait(&self, timeout: Duration) -> Option<Event> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

fn wake(waker: &Option<Waker>) {
    if let Some(waker) = waker {
        waker();
    }
}
