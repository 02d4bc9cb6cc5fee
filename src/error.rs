use std::path::PathBuf;

/// Custom error type for the stream recorder.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone '{0}'")]
    InvalidTimezone(String),

    #[error("Failed to start encoder '{program}': {source}")]
    EncoderSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoder failed with {}", exit_label(.code))]
    EncoderFailed { code: Option<i32>, stderr: String },

    #[error("Could not create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output file was not created: {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("Output file is empty: {}", .0.display())]
    OutputEmpty(PathBuf),

    #[error("Could not inspect output file {}: {source}", .path.display())]
    OutputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not refresh alias {}: {source}", .path.display())]
    Alias {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecorderError {
    /// Whether this error ends the run. Only alias failures are survivable.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Alias { .. })
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("error code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
