use crate::core::backends::backend::ComputeBackend;
use crate::core::backends::errors::RenderError;
use crate::core::backends::request::RenderRequest;
use crate::core::colour_mapping::gradient::ColourGradient;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Everything the worker needs for one render.
pub struct RenderJob {
    pub generation: u64,
    pub request: RenderRequest,
    pub gradient: Arc<ColourGradient>,
    pub backend: Arc<dyn ComputeBackend>,
}

/// Finished render waiting to be picked up on a frame boundary.
#[derive(Debug)]
pub struct RenderCompletion {
    pub generation: u64,
    pub result: Result<PixelBuffer, RenderError>,
    pub render_duration: Duration,
}

struct SharedState {
    last_completed_generation: AtomicU64,
    latest_job: Mutex<Option<RenderJob>>,
    wake: Condvar,
    completed: Mutex<Vec<RenderCompletion>>,
    shutdown: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Background thread for asynchronous backends. Jobs are never interrupted;
/// each one runs to completion and its result is queued for
/// [`take_completions`](Self::take_completions).
pub struct AsyncRenderWorker {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl AsyncRenderWorker {
    #[must_use]
    pub fn new() -> Self {
        let shared = Arc::new(SharedState {
            last_completed_generation: AtomicU64::new(0),
            latest_job: Mutex::new(None),
            wake: Condvar::new(),
            completed: Mutex::new(Vec::new()),
            shutdown: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::Builder::new()
            .name("render-worker".to_string())
            .spawn(move || {
                Self::worker_loop(&worker_shared);
            })
            .map_err(|err| log::error!("Could not start render worker: {}", err))
            .ok();

        Self { shared, worker }
    }

    /// Queues `job`, replacing any job that has not started yet.
    pub fn submit(&self, job: RenderJob) -> u64 {
        let generation = job.generation;

        if self.worker.is_none() {
            self.complete(RenderCompletion {
                generation,
                result: Err(RenderError::BackendUnavailable {
                    backend: job.backend.kind(),
                    reason: "render worker is not running".to_string(),
                }),
                render_duration: Duration::ZERO,
            });
            return generation;
        }

        *lock(&self.shared.latest_job) = Some(job);
        self.shared.wake.notify_one();

        generation
    }

    /// Completed renders since the last call, oldest first.
    pub fn take_completions(&self) -> Vec<RenderCompletion> {
        std::mem::take(&mut *lock(&self.shared.completed))
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    fn complete(&self, completion: RenderCompletion) {
        Self::publish(&self.shared, completion);
    }

    fn publish(shared: &SharedState, completion: RenderCompletion) {
        let generation = completion.generation;
        lock(&shared.completed).push(completion);
        shared
            .last_completed_generation
            .fetch_max(generation, Ordering::AcqRel);
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let job = {
                let mut guard = lock(&shared.latest_job);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(job) = guard.take() {
                        break job;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            log::debug!(
                "Worker rendering generation {} on {}",
                job.generation,
                job.backend.kind()
            );

            let start = Instant::now();
            let result = job.backend.render(&job.request, &job.gradient);
            let render_duration = start.elapsed();

            Self::publish(
                shared,
                RenderCompletion {
                    generation: job.generation,
                    result,
                    render_duration,
                },
            );
        }
    }
}

impl Default for AsyncRenderWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AsyncRenderWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
