use clap::Parser;
use env_logger::Env;
use escape_time_explorer::{
    BackendKind, ExplorerConfig, HostAcceleratorDevice, PpmCapturePresenter, PresenterPort,
    ViewTransition, ViewportController,
};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Simulated hold time per zoom step.
const ZOOM_STEP: Duration = Duration::from_secs(1);
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Renders an escape-time fractal headless and writes the final frame as PPM.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Starting iteration budget.
    #[arg(short, long)]
    iterations: Option<u32>,

    #[arg(short, long)]
    power: Option<f64>,

    /// Render the Julia set for the configured seed.
    #[arg(long)]
    julia: bool,

    /// scalar, data-parallel or external-accelerator.
    #[arg(short, long)]
    backend: Option<BackendKind>,

    /// Zoom steps toward the view centre, each one a second of held input.
    #[arg(short, long, default_value_t = 0)]
    zoom_steps: u32,

    /// Frames to render after navigation settles.
    #[arg(short, long, default_value_t = 1)]
    frames: u32,

    #[arg(short, long, default_value = "output/fractal.ppm")]
    output: PathBuf,
}

impl Args {
    fn explorer_config(&self) -> Result<ExplorerConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => ExplorerConfig::load(path)?,
            None => ExplorerConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(iterations) = self.iterations {
            config.iteration_budget = iterations;
        }
        if let Some(power) = self.power {
            config.power = power;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        config.julia_mode |= self.julia;

        config.validate()?;
        Ok(config)
    }
}

/// Ticks until every queued transition and render has been handled.
fn settle(controller: &mut ViewportController) {
    loop {
        controller.tick(POLL_INTERVAL);
        if controller.is_idle() {
            return;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.explorer_config()?;

    let output_dir = args
        .output
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    if !output_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&output_dir)?;
    }

    let accelerator = HostAcceleratorDevice::new(config.accelerator_threads)?;
    let presenter = Arc::new(PpmCapturePresenter::new(output_dir));
    let mut controller = ViewportController::new(
        config,
        Arc::clone(&presenter) as Arc<dyn PresenterPort>,
        Some(Arc::new(accelerator)),
    )?;

    for _ in 0..args.zoom_steps {
        controller.queue(ViewTransition::Zoom {
            toward_center: true,
        });
        controller.tick(ZOOM_STEP);
    }
    settle(&mut controller);

    for _ in 1..args.frames {
        controller.queue(ViewTransition::Rerender { capture: false });
        settle(&mut controller);
    }

    if presenter.write_latest(&args.output)? {
        log::info!(
            "Wrote {} after {} frames (budget now {})",
            args.output.display(),
            presenter.frames_presented(),
            controller.state().iteration_budget()
        );
    } else {
        log::warn!("No frame was rendered");
    }

    Ok(())
}
