use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::debug;

use crate::constants::{AUDIO_BITRATE, AUDIO_CODEC, AUDIO_SAMPLE_RATE, OUTPUT_FORMAT};
use crate::error::RecorderError;

/// One bounded encode: read `stream_url` for `duration_seconds` and write a
/// single MP3 file to `output_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeJob {
    pub stream_url: String,
    pub duration_seconds: u64,
    pub output_file: PathBuf,
}

impl EncodeJob {
    pub fn new(stream_url: &str, duration_seconds: u64, output_file: &Path) -> Self {
        EncodeJob {
            stream_url: stream_url.to_string(),
            duration_seconds,
            output_file: output_file.to_path_buf(),
        }
    }

    /// The encoder argument list for the fixed audio profile.
    pub fn ffmpeg_args(&self) -> Vec<OsString> {
        let duration = self.duration_seconds.to_string();
        let sample_rate = AUDIO_SAMPLE_RATE.to_string();

        let mut args: Vec<OsString> = [
            "-re",
            "-i",
            self.stream_url.as_str(),
            "-t",
            duration.as_str(),
            "-vn",
            "-acodec",
            AUDIO_CODEC,
            "-ar",
            sample_rate.as_str(),
            "-b:a",
            AUDIO_BITRATE,
            "-f",
            OUTPUT_FORMAT,
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(self.output_file.clone().into_os_string());
        args
    }
}

/// Captured output of an encoder run that exited successfully.
#[derive(Debug, Clone, Default)]
pub struct EncodeOutput {
    pub stdout: String,
    pub stderr: String,
}

/// The Encoder trait is the seam between the recorder and the external
/// media tool that does the actual work.
///
/// Implementations block until the encode has finished. A non-zero exit is
/// reported as `RecorderError::EncoderFailed`.
pub trait Encoder {
    fn encode(&mut self, job: &EncodeJob) -> Result<EncodeOutput, RecorderError>;
}

/// Runs ffmpeg as a child process and waits for it to exit.
///
/// The run is bounded only by the `-t` argument handed to ffmpeg; there is no
/// separate wall-clock timeout.
pub struct FfmpegEncoder {
    program: String,
}

impl FfmpegEncoder {
    pub fn new(program: &str) -> Self {
        FfmpegEncoder {
            program: program.to_string(),
        }
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&mut self, job: &EncodeJob) -> Result<EncodeOutput, RecorderError> {
        let args = job.ffmpeg_args();
        debug!(
            "Running {} {}",
            self.program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RecorderError::EncoderSpawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(RecorderError::EncoderFailed {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(EncodeOutput { stdout, stderr })
    }
}
