use chrono_tz::Tz;
use log::{debug, info};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::constants::{
    DEFAULT_FFMPEG_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEZONE, ENV_CONFIG, ENV_STREAM_URL,
    ENV_TIMEZONE, SECONDS_PER_MINUTE,
};
use crate::error::RecorderError;
use crate::utils::{resolve_timezone, validate_prefix};

/// Layered, not yet validated settings for a recording run.
///
/// Values are resolved with command line flags having the highest precedence,
/// followed by environment variables, then the config file, and then defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecorderSettings {
    /// Stream source URL
    pub stream_url: Option<String>,
    /// Directory for saving recordings
    pub output_dir: Option<PathBuf>,
    /// IANA timezone used for file timestamps
    pub timezone: Option<String>,
    /// Encoder executable
    pub ffmpeg_path: Option<String>,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        RecorderSettings {
            stream_url: None,
            output_dir: Some(PathBuf::from(DEFAULT_OUTPUT_DIR)),
            timezone: Some(DEFAULT_TIMEZONE.to_string()),
            ffmpeg_path: Some(DEFAULT_FFMPEG_PATH.to_string()),
        }
    }
}

impl RecorderSettings {
    /// Settings with every field unset.
    pub const fn empty() -> Self {
        RecorderSettings {
            stream_url: None,
            output_dir: None,
            timezone: None,
            ffmpeg_path: None,
        }
    }

    /// Resolve all layers for the given command line.
    pub fn load(cli: &Cli) -> Result<Self, RecorderError> {
        let mut settings = RecorderSettings::default();

        if let Some(path) = Self::config_file_path(cli.config.as_deref()) {
            settings.merge(Self::from_file(&path)?);
            info!("Loaded configuration from {}", path.display());
        }

        settings.apply_env_vars();
        settings.merge(Self::from_cli(cli));

        Ok(settings)
    }

    /// The config file named on the command line, or else by the environment.
    fn config_file_path(cli_path: Option<&Path>) -> Option<PathBuf> {
        cli_path
            .map(Path::to_path_buf)
            .or_else(|| non_empty_var(ENV_CONFIG).map(PathBuf::from))
    }

    /// Read settings from a TOML file. A file that was asked for but cannot be
    /// read or parsed is an error.
    pub fn from_file(path: &Path) -> Result<Self, RecorderError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RecorderError::Config(format!(
                "Error reading config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str::<RecorderSettings>(&content).map_err(|e| {
            RecorderError::Config(format!(
                "Error parsing config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Settings carried by command line flags.
    pub fn from_cli(cli: &Cli) -> Self {
        RecorderSettings {
            stream_url: cli.stream_url.clone().filter(|s| !s.is_empty()),
            output_dir: cli.output_dir.clone(),
            timezone: cli.timezone.clone(),
            ffmpeg_path: cli.ffmpeg.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Merge another layer into this one, only taking values that are Some
    pub fn merge(&mut self, other: RecorderSettings) {
        if other.stream_url.is_some() {
            self.stream_url = other.stream_url;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.timezone.is_some() {
            self.timezone = other.timezone;
        }
        if other.ffmpeg_path.is_some() {
            self.ffmpeg_path = other.ffmpeg_path;
        }
    }

    /// Apply environment variables to override configuration
    fn apply_env_vars(&mut self) {
        if let Some(val) = non_empty_var(ENV_STREAM_URL) {
            debug!("Using stream URL from {}", ENV_STREAM_URL);
            self.stream_url = Some(val);
        }

        // A set but blank zone is kept so it fails resolution instead of
        // quietly becoming the default
        if let Ok(val) = env::var(ENV_TIMEZONE) {
            debug!("Using timezone from {}", ENV_TIMEZONE);
            self.timezone = Some(val);
        }
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample_config() -> String {
        format!(
            r#"# Stream Recorder Configuration
# Values set here are overridden by environment variables and command line flags.

# Stream URL to record (overridden by STREAM_URL / --stream-url)
# stream_url = "http://192.168.1.10:8875/?freq=11836"

# Output directory for recordings
# Default: {}
output_dir = "{}"

# IANA timezone used for file timestamps (overridden by TIMEZONE / --timezone)
# Default: {}
timezone = "{}"

# Encoder executable
# Default: {}
ffmpeg_path = "{}"
"#,
            DEFAULT_OUTPUT_DIR,
            DEFAULT_OUTPUT_DIR,
            DEFAULT_TIMEZONE,
            DEFAULT_TIMEZONE,
            DEFAULT_FFMPEG_PATH,
            DEFAULT_FFMPEG_PATH,
        )
    }

    pub fn get_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn get_timezone(&self) -> String {
        self.timezone
            .clone()
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
    }

    pub fn get_ffmpeg_path(&self) -> String {
        self.ffmpeg_path
            .clone()
            .unwrap_or_else(|| DEFAULT_FFMPEG_PATH.to_string())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Validated, immutable configuration for one recording.
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    stream_url: String,
    duration_minutes: u64,
    duration_seconds: u64,
    file_prefix: String,
    output_dir: PathBuf,
    timezone: Tz,
    ffmpeg_path: String,
}

impl RecordingConfig {
    /// Validate the resolved settings together with the positional arguments.
    ///
    /// Nothing here touches the filesystem, so a rejected configuration
    /// leaves the output directory untouched.
    pub fn resolve(
        settings: &RecorderSettings,
        duration_minutes: i64,
        file_prefix: &str,
    ) -> Result<Self, RecorderError> {
        let stream_url = settings
            .stream_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                RecorderError::Config(format!(
                    "Stream URL not provided. Use --stream-url or set {} environment variable.",
                    ENV_STREAM_URL
                ))
            })?;

        if duration_minutes <= 0 {
            return Err(RecorderError::Config(
                "Duration must be greater than 0".to_string(),
            ));
        }
        let duration_minutes = duration_minutes.unsigned_abs();
        let duration_seconds = duration_minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .ok_or_else(|| {
                RecorderError::Config(format!("Duration of {} minutes is too large", duration_minutes))
            })?;

        validate_prefix(file_prefix)?;

        let timezone = resolve_timezone(&settings.get_timezone())?;

        Ok(RecordingConfig {
            stream_url,
            duration_minutes,
            duration_seconds,
            file_prefix: file_prefix.to_string(),
            output_dir: settings.get_output_dir(),
            timezone,
            ffmpeg_path: settings.get_ffmpeg_path(),
        })
    }

    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    pub const fn duration_minutes(&self) -> u64 {
        self.duration_minutes
    }

    /// Encoder time limit, always `duration_minutes * 60`.
    pub const fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.ffmpeg_path
    }
}
