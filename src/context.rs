//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::edge_function::EdgeFunctionGenerator;
use crate::adapters::live::file_saver::FileSaver;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::GENERATION_PORT;
use crate::config::Config;
use crate::error::ImageError;
use crate::ports::{ImageGenerator, ImageSaver};

/// Bundles the service-facing ports the view depends on.
pub struct ServiceContext {
    /// Generation service port.
    pub generator: Box<dyn ImageGenerator>,
    /// Download boundary.
    pub saver: Box<dyn ImageSaver>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write everything recorded so far to the cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder lock is poisoned or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let mut recorder =
            self.recorder.lock().map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        if recorder.is_empty() {
            log::warn!("writing an empty cassette to {}", recorder.path().display());
        }
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context talking to the configured service.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or access key is not configured.
    pub fn live(config: &Config) -> Result<Self, ImageError> {
        let service = config.service()?;
        log::debug!("using generation service at {}", service.base_url);
        Ok(Self {
            generator: Box::new(EdgeFunctionGenerator::new(&service)),
            saver: Box::new(FileSaver::new()),
        })
    }

    /// Create a live context whose generation calls are recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), ImageError> {
        let live = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".imagegen/cassettes")
            .join(&timestamp)
            .join(format!("{GENERATION_PORT}.cassette.yaml"));
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-{GENERATION_PORT}"),
            get_commit_hash(),
        )));

        let ctx = Self {
            generator: Box::new(RecordingImageGenerator::new(live.generator, Arc::clone(&recorder))),
            saver: live.saver,
        };
        Ok((ctx, RecordingSession { recorder }))
    }

    /// Create a context that replays generation outcomes from a cassette.
    ///
    /// Downloads still go through the live saver.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ImageError> {
        let replayer = Arc::new(Mutex::new(load_cassette(path)?));
        Ok(Self {
            generator: Box::new(ReplayingImageGenerator::new(replayer)),
            saver: Box::new(FileSaver::new()),
        })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
