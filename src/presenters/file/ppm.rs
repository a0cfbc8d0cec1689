use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::PresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::storage::write_ppm::write_ppm;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Presented {
    latest: Option<(u64, PixelBuffer)>,
    frames: usize,
    captures: Vec<PathBuf>,
}

/// Keeps the newest frame and writes frames marked for capture to
/// `capture-<generation>.ppm` under the output directory.
pub struct PpmCapturePresenter {
    output_dir: PathBuf,
    presented: Mutex<Presented>,
}

impl PpmCapturePresenter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            presented: Mutex::new(Presented::default()),
        }
    }

    fn presented(&self) -> MutexGuard<'_, Presented> {
        self.presented.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn frames_presented(&self) -> usize {
        self.presented().frames
    }

    #[must_use]
    pub fn captures(&self) -> Vec<PathBuf> {
        self.presented().captures.clone()
    }

    /// Writes the newest frame to `filepath`. Returns `false` when nothing
    /// has been presented yet.
    pub fn write_latest(&self, filepath: impl AsRef<Path>) -> std::io::Result<bool> {
        match &self.presented().latest {
            Some((_, buffer)) => write_ppm(buffer, filepath).map(|()| true),
            None => Ok(false),
        }
    }
}

impl PresenterPort for PpmCapturePresenter {
    fn present(&self, event: RenderEvent) {
        match event {
            RenderEvent::Frame(frame) => {
                let mut presented = self.presented();
                presented.frames += 1;

                if frame.capture {
                    let path = self
                        .output_dir
                        .join(format!("capture-{}.ppm", frame.generation));

                    match write_ppm(&frame.pixel_buffer, &path) {
                        Ok(()) => {
                            log::info!("Captured frame {} to {}", frame.generation, path.display());
                            presented.captures.push(path);
                        }
                        Err(err) => log::error!("Could not write {}: {}", path.display(), err),
                    }
                }

                presented.latest = Some((frame.generation, frame.pixel_buffer));
            }
            RenderEvent::Error(failure) => log::error!("{}", failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::data::frame_data::FrameData;
    use crate::controllers::interactive::errors::frame_failure::FrameFailure;
    use crate::core::backends::errors::RenderError;
    use crate::core::data::pixel_rect::PixelRect;
    use std::time::Duration;

    fn frame(generation: u64, capture: bool) -> RenderEvent {
        RenderEvent::Frame(FrameData {
            generation,
            pixel_buffer: PixelBuffer::new(PixelRect::from_size(2, 2).unwrap()),
            render_duration: Duration::from_millis(1),
            capture,
        })
    }

    #[test]
    fn test_only_marked_frames_are_captured() {
        let dir = tempfile::tempdir().unwrap();
        let presenter = PpmCapturePresenter::new(dir.path());

        presenter.present(frame(1, false));
        presenter.present(frame(2, true));
        presenter.present(RenderEvent::Error(FrameFailure {
            generation: 3,
            error: RenderError::EmptyGradient,
        }));

        assert_eq!(presenter.frames_presented(), 2);
        assert_eq!(presenter.captures(), vec![dir.path().join("capture-2.ppm")]);
        assert!(dir.path().join("capture-2.ppm").exists());
        assert!(!dir.path().join("capture-1.ppm").exists());
    }

    #[test]
    fn test_write_latest() {
        let dir = tempfile::tempdir().unwrap();
        let presenter = PpmCapturePresenter::new(dir.path());
        let path = dir.path().join("latest.ppm");

        assert!(!presenter.write_latest(&path).unwrap());

        presenter.present(frame(4, false));

        assert!(presenter.write_latest(&path).unwrap());
        assert!(std::fs::read(&path).unwrap().starts_with(b"P6\n2 2\n255\n"));
    }
}
