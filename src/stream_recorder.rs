use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::alias::refresh_alias;
use crate::config::RecordingConfig;
use crate::encoder::{EncodeJob, Encoder};
use crate::error::RecorderError;
use crate::utils::{alias_file_name, bytes_to_mib, format_timestamp, recording_file_name};

/// Where a recording run currently stands. The flow is strictly linear; any
/// failure jumps to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingStage {
    ConfigResolved,
    DirectoryEnsured,
    EncodeRunning,
    EncodeExited,
    OutputValidated,
    AliasRefreshed,
    Done,
    Failed,
}

impl fmt::Display for RecordingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ConfigResolved => "configuration",
            Self::DirectoryEnsured => "output directory setup",
            Self::EncodeRunning => "encoding",
            Self::EncodeExited => "encoder exit",
            Self::OutputValidated => "output validation",
            Self::AliasRefreshed => "alias refresh",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Outcome of a successful recording.
#[derive(Debug)]
pub struct RecordingReport {
    pub output_file: PathBuf,
    pub size_bytes: u64,
    pub alias_path: PathBuf,
    /// Result of the best-effort alias refresh. An error here never fails
    /// the recording.
    pub alias: Result<(), RecorderError>,
}

/// The main struct responsible for running one recording.
///
/// It takes an implementation of the Encoder trait and drives it through the
/// directory setup, encode, validation and alias steps.
pub struct StreamRecorder<E: Encoder> {
    pub encoder: E,
    stage: RecordingStage,
    /// Step currently being attempted, cleared once it completes.
    pending: Option<RecordingStage>,
    failed_at: Option<RecordingStage>,
}

impl<E: Encoder> StreamRecorder<E> {
    /// Create a new StreamRecorder with the given encoder.
    pub const fn new(encoder: E) -> Self {
        StreamRecorder {
            encoder,
            stage: RecordingStage::ConfigResolved,
            pending: None,
            failed_at: None,
        }
    }

    /// Get a reference to the encoder.
    pub const fn get_encoder(&self) -> &E {
        &self.encoder
    }

    pub const fn stage(&self) -> RecordingStage {
        self.stage
    }

    /// The step that was being attempted when the run failed, if it did.
    pub const fn failed_at(&self) -> Option<RecordingStage> {
        self.failed_at
    }

    /// Record `config.stream_url()` into a file stamped with `started_at`.
    ///
    /// Blocks until the encoder exits. Fatal errors are returned as they
    /// happen; an alias failure is logged and carried in the report.
    pub fn record(
        &mut self,
        config: &RecordingConfig,
        started_at: DateTime<Utc>,
    ) -> Result<RecordingReport, RecorderError> {
        self.stage = RecordingStage::ConfigResolved;
        self.pending = None;
        self.failed_at = None;

        let result = self.run(config, started_at);
        if result.is_err() {
            self.failed_at = Some(self.pending.unwrap_or(self.stage));
            self.stage = RecordingStage::Failed;
        }
        result
    }

    /// Mark `stage` as the step about to run, so a failure is blamed on it.
    fn attempt(&mut self, stage: RecordingStage) {
        self.pending = Some(stage);
    }

    fn advance(&mut self, stage: RecordingStage) {
        debug!("Recording stage: {} -> {}", self.stage, stage);
        self.stage = stage;
        self.pending = None;
    }

    fn run(
        &mut self,
        config: &RecordingConfig,
        started_at: DateTime<Utc>,
    ) -> Result<RecordingReport, RecorderError> {
        let output_dir = config.output_dir();
        self.attempt(RecordingStage::DirectoryEnsured);
        fs::create_dir_all(output_dir).map_err(|source| RecorderError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        self.advance(RecordingStage::DirectoryEnsured);

        let timestamp = format_timestamp(started_at, &config.timezone());
        let file_name = recording_file_name(config.file_prefix(), &timestamp);
        let output_file = output_dir.join(&file_name);

        info!("Starting recording...");
        info!("Stream URL: {}", config.stream_url());
        info!("Duration: {} minutes", config.duration_minutes());
        info!("Output file: {}", output_file.display());

        let job = EncodeJob::new(config.stream_url(), config.duration_seconds(), &output_file);
        self.advance(RecordingStage::EncodeRunning);
        let output = self.encoder.encode(&job)?;
        self.advance(RecordingStage::EncodeExited);

        if !output.stdout.is_empty() {
            debug!("Encoder stdout: {}", output.stdout.trim_end());
        }
        if !output.stderr.is_empty() {
            debug!("Encoder stderr: {}", output.stderr.trim_end());
        }
        info!("Recording completed successfully!");

        self.attempt(RecordingStage::OutputValidated);
        let size_bytes = validate_output(&output_file)?;
        self.advance(RecordingStage::OutputValidated);
        info!("File saved: {}", output_file.display());
        info!("File size: {:.2} MiB", bytes_to_mib(size_bytes));

        let alias_path = output_dir.join(alias_file_name(config.file_prefix()));
        let alias = refresh_alias(&alias_path, Path::new(&file_name));
        match &alias {
            Ok(()) => info!("Symlink created: {} -> {}", alias_path.display(), file_name),
            Err(e) => warn!("Could not create symlink: {}", e),
        }
        self.advance(RecordingStage::AliasRefreshed);
        self.advance(RecordingStage::Done);

        Ok(RecordingReport {
            output_file,
            size_bytes,
            alias_path,
            alias,
        })
    }
}

/// Confirm the encoder actually produced something. Returns the file size.
fn validate_output(output_file: &Path) -> Result<u64, RecorderError> {
    let meta = match fs::metadata(output_file) {
        Ok(meta) if meta.is_file() => meta,
        Ok(_) => return Err(RecorderError::OutputMissing(output_file.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RecorderError::OutputMissing(output_file.to_path_buf()));
        }
        Err(source) => {
            return Err(RecorderError::OutputUnreadable {
                path: output_file.to_path_buf(),
                source,
            });
        }
    };

    if meta.len() == 0 {
        return Err(RecorderError::OutputEmpty(output_file.to_path_buf()));
    }

    Ok(meta.len())
}
