use log::debug;

use crate::encoder::{EncodeJob, EncodeOutput, Encoder};
use crate::error::RecorderError;
use std::fs;

/// MockEncoder simulates an encoder run for testing purposes without
/// requiring ffmpeg or a reachable stream.
pub struct MockEncoder {
    /// Every job handed to `encode`, in order.
    pub jobs: Vec<EncodeJob>,
    /// Number of bytes written to the output file on success.
    pub payload_len: usize,
    /// When true, exit "non-zero" with `stderr_text` and write nothing.
    pub should_fail: bool,
    /// When true, report success without creating the output file.
    pub skip_output: bool,
    /// When true, create the output file but leave it empty.
    pub create_empty_file: bool,
    pub stderr_text: String,
}

impl MockEncoder {
    pub fn new() -> Self {
        MockEncoder {
            jobs: Vec::new(),
            payload_len: 4096,
            should_fail: false,
            skip_output: false,
            create_empty_file: false,
            stderr_text: String::new(),
        }
    }

    /// A mock that fails like an encoder that could not open its input.
    pub fn failing(stderr: &str) -> Self {
        MockEncoder {
            should_fail: true,
            stderr_text: stderr.to_string(),
            ..MockEncoder::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.jobs.len()
    }
}

impl Encoder for MockEncoder {
    fn encode(&mut self, job: &EncodeJob) -> Result<EncodeOutput, RecorderError> {
        self.jobs.push(job.clone());

        if self.should_fail {
            return Err(RecorderError::EncoderFailed {
                code: Some(1),
                stderr: self.stderr_text.clone(),
            });
        }

        if self.skip_output {
            debug!("Mock encoder exiting 0 without output");
            return Ok(EncodeOutput::default());
        }

        let payload = if self.create_empty_file {
            Vec::new()
        } else {
            // MP3 frame sync bytes repeated, content does not matter
            [0xFF_u8, 0xFB].repeat(self.payload_len / 2)
        };
        fs::write(&job.output_file, payload)?;
        debug!("Created mock recording {}", job.output_file.display());

        Ok(EncodeOutput {
            stdout: String::new(),
            stderr: self.stderr_text.clone(),
        })
    }
}
