use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::frame_failure::FrameFailure;
use crate::controllers::interactive::errors::viewport::ViewportError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::PresenterPort;
use crate::controllers::interactive::scheduler::{RenderScheduler, SchedulerAction};
use crate::controllers::interactive::transitions::ViewTransition;
use crate::controllers::interactive::worker::{AsyncRenderWorker, RenderCompletion, RenderJob};
use crate::core::backends::backend::ComputeBackend;
use crate::core::backends::device::AcceleratorDevice;
use crate::core::backends::errors::RenderError;
use crate::core::backends::factory::create_backend;
use crate::core::backends::kind::{BackendKind, DispatchMode};
use crate::core::backends::request::{ProbeResult, RenderRequest};
use crate::core::backends::scalar::ScalarBackend;
use crate::core::colour_mapping::gradient::ColourGradient;
use crate::core::config::explorer_config::ExplorerConfig;
use crate::core::data::complex::Complex;
use crate::core::data::device_layout::Precision;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::viewport_state::ViewportState;
use crate::core::errors::configuration::ConfigurationError;
use crate::core::fractals::escape_time::grid::PixelGrid;
use crate::core::fractals::escape_time::orbit::{OrbitTrace, trace_orbit};
use crate::core::fractals::escape_time::params::EscapeTimeParams;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What the render step of a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderDispatch {
    #[default]
    Idle,
    /// Synchronous render finished within the tick.
    Rendered { generation: u64 },
    Submitted { generation: u64 },
    /// Waiting for the render in flight; the newest request is pending.
    Coalesced,
    /// Nothing to draw with; the previous frame stays on screen.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented { generation: u64 },
    Discarded { generation: u64 },
    Failed { generation: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickReport {
    pub applied: usize,
    pub rejected: usize,
    pub dispatch: RenderDispatch,
    pub frames: Vec<FrameOutcome>,
}

struct PendingRender {
    request: RenderRequest,
    revision: u64,
    capture: bool,
    backend: Arc<dyn ComputeBackend>,
}

struct Submission {
    generation: u64,
    request: RenderRequest,
    revision: u64,
    capture: bool,
    precision: Precision,
}

/// Grid and parameters of the last accepted frame, used for point
/// inspection.
struct RenderedView {
    grid: PixelGrid,
    params: EscapeTimeParams,
    precision: Precision,
}

fn precision_for(kind: BackendKind, request: &RenderRequest) -> Precision {
    match kind {
        BackendKind::Scalar => Precision::Native,
        BackendKind::DataParallel | BackendKind::ExternalAccelerator => {
            Precision::for_view(&request.state().bounds(), request.width(), request.height())
        }
    }
}

/// Owns the single mutable [`ViewportState`] and turns queued transitions
/// into at most one render per tick.
pub struct ViewportController {
    config: ExplorerConfig,
    state: ViewportState,
    width: u32,
    height: u32,
    gradient: Arc<ColourGradient>,
    backend: Arc<dyn ComputeBackend>,
    accelerator: Option<Arc<dyn AcceleratorDevice>>,
    presenter: Arc<dyn PresenterPort>,
    transitions: VecDeque<ViewTransition>,
    revision: u64,
    next_generation: u64,
    render_needed: bool,
    capture_next: bool,
    scheduler: RenderScheduler<PendingRender>,
    in_flight: Option<Submission>,
    worker: AsyncRenderWorker,
    last_render: Option<RenderedView>,
}

impl ViewportController {
    /// Builds the configured backend, falling back to [`BackendKind::Scalar`]
    /// when it cannot be opened.
    pub fn new(
        config: ExplorerConfig,
        presenter: Arc<dyn PresenterPort>,
        accelerator: Option<Arc<dyn AcceleratorDevice>>,
    ) -> Result<Self, ViewportError> {
        let backend = match create_backend(config.backend, accelerator.clone()) {
            Ok(backend) => backend,
            Err(err) => {
                log::warn!("{}; falling back to the scalar backend", err);
                create_backend(BackendKind::Scalar, None)?
            }
        };

        let mut controller = Self::with_backend(config, backend, presenter)?;
        controller.accelerator = accelerator;
        Ok(controller)
    }

    pub fn with_backend(
        config: ExplorerConfig,
        backend: Arc<dyn ComputeBackend>,
        presenter: Arc<dyn PresenterPort>,
    ) -> Result<Self, ViewportError> {
        config.validate()?;
        let state = config.initial_state()?;

        log::info!(
            "Viewport {}x{} on {} backend, {}",
            config.width,
            config.height,
            backend.kind(),
            state.bounds()
        );

        Ok(Self {
            width: config.width,
            height: config.height,
            gradient: Arc::new(config.colour_stops.clone()),
            config,
            state,
            backend,
            accelerator: None,
            presenter,
            transitions: VecDeque::new(),
            revision: 0,
            next_generation: 0,
            render_needed: true,
            capture_next: false,
            scheduler: RenderScheduler::new(),
            in_flight: None,
            worker: AsyncRenderWorker::new(),
            last_render: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    #[must_use]
    pub fn gradient(&self) -> &ColourGradient {
        &self.gradient
    }

    /// No queued input, no render pending or in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.transitions.is_empty()
            && !self.render_needed
            && !self.scheduler.has_pending()
            && self.in_flight.is_none()
    }

    pub fn queue(&mut self, transition: ViewTransition) {
        self.transitions.push_back(transition);
    }

    pub fn set_gradient(&mut self, gradient: ColourGradient) {
        self.gradient = Arc::new(gradient);
        self.invalidate_frames();
    }

    pub fn select_backend(&mut self, kind: BackendKind) -> Result<(), ViewportError> {
        let backend = create_backend(kind, self.accelerator.clone())?;

        log::info!("Switched to {} backend", backend.kind());
        self.backend = backend;
        self.invalidate_frames();
        Ok(())
    }

    /// Like [`select_backend`](Self::select_backend), but settles for the
    /// scalar backend. Returns the kind actually in use.
    pub fn select_backend_or_scalar(&mut self, kind: BackendKind) -> BackendKind {
        if let Err(err) = self.select_backend(kind) {
            log::warn!("{}; falling back to the scalar backend", err);
            self.backend = Arc::new(ScalarBackend::new());
            self.invalidate_frames();
        }

        self.backend.kind()
    }

    /// One frame: pick up finished renders, apply queued transitions in
    /// order, then issue at most one render for the settled state.
    pub fn tick(&mut self, elapsed: Duration) -> TickReport {
        let mut report = TickReport::default();

        for completion in self.worker.take_completions() {
            report.frames.push(self.finish(completion));
        }
        self.scheduler
            .observe_completion(self.worker.last_completed_generation());

        let dt = elapsed.as_secs_f64();
        while let Some(transition) = self.transitions.pop_front() {
            match self.apply(transition, dt) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    log::warn!("Ignoring {:?}: {}", transition, err);
                    report.rejected += 1;
                }
            }
        }

        report.dispatch = self.dispatch_render(&mut report.frames);
        report
    }

    /// Traces the orbit under pixel (`x`, `y`) of the last accepted frame.
    pub fn inspect_point(&self, x: i32, y: i32) -> Result<OrbitTrace, ViewportError> {
        let rendered = self.last_render.as_ref().ok_or(ViewportError::NotRendered)?;
        let pixel = Point { x, y };
        let coordinate = rendered.grid.extended_coordinate(pixel).map_err(|_| {
            let pixel_rect = rendered.grid.pixel_rect();
            ViewportError::PixelOutsideView {
                pixel,
                width: pixel_rect.width(),
                height: pixel_rect.height(),
            }
        })?;

        Ok(trace_orbit(coordinate, &rendered.params, rendered.precision))
    }

    /// Asks the backend for one pixel of the current state without
    /// rendering a frame.
    pub fn probe_point(&self, x: i32, y: i32) -> Result<ProbeResult, ViewportError> {
        let pixel = Point { x, y };
        let request = RenderRequest::new(self.state.clone(), self.width, self.height)?;

        if !request.pixel_rect().contains_point(pixel) {
            return Err(ViewportError::PixelOutsideView {
                pixel,
                width: self.width,
                height: self.height,
            });
        }

        Ok(self.backend.probe(&request, pixel)?)
    }

    /// Frames in flight and the pending request were made with settings that
    /// no longer apply. The in-flight frame will arrive stale; the pending
    /// one is dropped here.
    fn invalidate_frames(&mut self) {
        self.revision += 1;
        if let Some(pending) = self.scheduler.take_pending() {
            self.capture_next |= pending.capture;
        }
        self.render_needed = true;
    }

    /// A capture requested for a discarded frame moves to the next render.
    fn carry_capture(&mut self) {
        match self.scheduler.pending_mut() {
            Some(pending) => pending.capture = true,
            None => {
                self.capture_next = true;
                self.render_needed = true;
            }
        }
    }

    fn apply(&mut self, transition: ViewTransition, dt: f64) -> Result<(), ViewportError> {
        match transition {
            ViewTransition::Pan { dx, dy } => {
                let step = self.config.pan_speed * dt;
                self.state.pan(dx * step, dy * step)?;
            }
            ViewTransition::Zoom { toward_center } => {
                self.state.zoom(self.config.zoom_speed * dt, toward_center)?;
            }
            ViewTransition::ChangePower { direction } => {
                self.state
                    .adjust_power(direction * self.config.power_speed * dt)?;
            }
            ViewTransition::NudgeJuliaSeed { dx, dy } => {
                let step = self.config.seed_speed * dt;
                self.state.nudge_julia_seed(Complex::new(dx * step, dy * step))?;
            }
            ViewTransition::ToggleJulia => self.state.toggle_julia_mode(),
            ViewTransition::Resize { width, height } => {
                PixelRect::from_size(width, height)
                    .map_err(|_| ConfigurationError::InvalidDimensions { width, height })?;
                self.width = width;
                self.height = height;
            }
            ViewTransition::SetBounds(bounds) => self.state.set_bounds(bounds),
            ViewTransition::Rerender { capture } => self.capture_next |= capture,
            ViewTransition::Reset => {
                self.state
                    .reset_view(self.config.default_bounds()?, self.config.iteration_budget)?;
                self.width = self.config.width;
                self.height = self.config.height;
            }
        }

        if transition.changes_view() {
            self.revision += 1;
        }
        self.render_needed = true;

        Ok(())
    }

    fn dispatch_render(&mut self, frames: &mut Vec<FrameOutcome>) -> RenderDispatch {
        if !self.render_needed {
            return self.flush_pending();
        }
        self.render_needed = false;

        if self.gradient.is_empty() {
            log::warn!("No gradient configured; keeping the previous frame");
            return RenderDispatch::Skipped;
        }

        let request = match RenderRequest::new(self.state.clone(), self.width, self.height) {
            Ok(request) => request,
            Err(err) => {
                log::error!("Render skipped: {}", err);
                return RenderDispatch::Skipped;
            }
        };

        let mut pending = PendingRender {
            request,
            revision: self.revision,
            capture: std::mem::take(&mut self.capture_next),
            backend: Arc::clone(&self.backend),
        };

        match pending.backend.dispatch_mode() {
            DispatchMode::Synchronous => {
                let generation = self.render_now(pending, frames);
                RenderDispatch::Rendered { generation }
            }
            DispatchMode::Asynchronous => {
                if let Some(replaced) = self.scheduler.take_pending() {
                    pending.capture |= replaced.capture;
                }

                let last_completed = self.worker.last_completed_generation();
                let action = self.scheduler.update(pending, last_completed, |pending| {
                    Self::submit(
                        &self.worker,
                        &self.gradient,
                        &mut self.next_generation,
                        &mut self.in_flight,
                        pending,
                    )
                });

                Self::dispatch_from(action)
            }
        }
    }

    fn flush_pending(&mut self) -> RenderDispatch {
        let last_completed = self.worker.last_completed_generation();
        let action = self.scheduler.flush(last_completed, |pending| {
            Self::submit(
                &self.worker,
                &self.gradient,
                &mut self.next_generation,
                &mut self.in_flight,
                pending,
            )
        });

        Self::dispatch_from(action)
    }

    fn dispatch_from(action: SchedulerAction) -> RenderDispatch {
        match action {
            SchedulerAction::Submitted { generation } => RenderDispatch::Submitted { generation },
            SchedulerAction::Coalesced => RenderDispatch::Coalesced,
            SchedulerAction::NothingToDo => RenderDispatch::Idle,
        }
    }

    fn submit(
        worker: &AsyncRenderWorker,
        gradient: &Arc<ColourGradient>,
        next_generation: &mut u64,
        in_flight: &mut Option<Submission>,
        pending: PendingRender,
    ) -> u64 {
        *next_generation += 1;
        let generation = *next_generation;

        log::debug!(
            "Submitting render {} ({}x{}) to {}",
            generation,
            pending.request.width(),
            pending.request.height(),
            pending.backend.kind()
        );

        *in_flight = Some(Submission {
            generation,
            precision: precision_for(pending.backend.kind(), &pending.request),
            request: pending.request.clone(),
            revision: pending.revision,
            capture: pending.capture,
        });

        worker.submit(RenderJob {
            generation,
            request: pending.request,
            gradient: Arc::clone(gradient),
            backend: pending.backend,
        })
    }

    fn render_now(&mut self, pending: PendingRender, frames: &mut Vec<FrameOutcome>) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;

        let start = Instant::now();
        let result = pending.backend.render(&pending.request, &self.gradient);
        let render_duration = start.elapsed();

        let submission = Submission {
            generation,
            precision: precision_for(pending.backend.kind(), &pending.request),
            request: pending.request,
            revision: pending.revision,
            capture: pending.capture,
        };

        frames.push(self.accept(submission, result, render_duration));
        generation
    }

    fn finish(&mut self, completion: RenderCompletion) -> FrameOutcome {
        let generation = completion.generation;

        match self.in_flight.take() {
            Some(submission) if submission.generation == generation => {
                self.accept(submission, completion.result, completion.render_duration)
            }
            other => {
                self.in_flight = other;
                log::debug!("Dropping unexpected completion {}", generation);
                FrameOutcome::Discarded { generation }
            }
        }
    }

    fn accept(
        &mut self,
        submission: Submission,
        result: Result<PixelBuffer, RenderError>,
        render_duration: Duration,
    ) -> FrameOutcome {
        let generation = submission.generation;

        if submission.revision != self.revision {
            log::debug!("Discarding stale frame {}", generation);
            if submission.capture {
                self.carry_capture();
            }
            return FrameOutcome::Discarded { generation };
        }

        match result {
            Ok(pixel_buffer) => {
                let params = match submission.request.params() {
                    Ok(params) => params,
                    Err(err) => return self.fail(generation, err.into()),
                };

                self.last_render = Some(RenderedView {
                    grid: submission.request.grid(),
                    params,
                    precision: submission.precision,
                });
                self.state.grow_iteration_budget();

                log::debug!("Frame {} rendered in {:?}", generation, render_duration);

                self.presenter.present(RenderEvent::Frame(FrameData {
                    generation,
                    pixel_buffer,
                    render_duration,
                    capture: submission.capture,
                }));

                FrameOutcome::Presented { generation }
            }
            Err(err) => self.fail(generation, err),
        }
    }

    fn fail(&self, generation: u64, error: RenderError) -> FrameOutcome {
        log::warn!("Render {} failed: {}", generation, error);

        self.presenter
            .present(RenderEvent::Error(FrameFailure { generation, error }));

        FrameOutcome::Failed { generation }
    }
}
