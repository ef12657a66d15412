//! One-shot background jobs
//!
//! A job runs a closure on a fresh thread and hands its value back over an
//! `mpsc` channel. There is no pool; each job owns its thread.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::error::{FxError, FxResult};

/// A value being computed on another thread
pub struct Job<T> {
    receiver: Receiver<T>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Job<T> {
    /// Run `work` on a new thread
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::spawn(move || {
            // The receiver is gone if the caller moved on; nothing to report then
            let _ = sender.send(work());
        });

        Self {
            receiver,
            worker: Some(worker),
        }
    }
}

impl<T> Job<T> {
    /// The finished value, or `None` while still running
    ///
    /// A worker that dies without sending yields an error.
    pub fn try_result(&mut self) -> Option<FxResult<T>> {
        match self.receiver.try_recv() {
            Ok(value) => {
                self.join();
                Some(Ok(value))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join();
                Some(Err(worker_failed()))
            }
        }
    }

    /// Block until the job finishes
    pub fn wait(mut self) -> FxResult<T> {
        let result = self.receiver.recv().map_err(|_| worker_failed());
        self.join();
        result
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("Background worker panicked");
            }
        }
    }
}

fn worker_failed() -> FxError {
    FxError::Network("Background worker stopped before producing a result".into())
}
