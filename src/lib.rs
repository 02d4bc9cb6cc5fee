// stream_recorder: records a network audio stream to timestamped MP3 files
// Copyright (C) 2023, David Fisher
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// Modular organization of code
mod alias;
mod cli;
mod config;
mod constants;
mod encoder;
mod error;
mod stream_recorder;
mod utils;

// Only include the mock encoder in test builds
#[cfg(test)]
mod mock_encoder;

#[cfg(test)]
mod tests;

// Re-exports for public API
pub use alias::refresh_alias;
pub use cli::Cli;
pub use config::{RecorderSettings, RecordingConfig};
pub use constants::*;
pub use encoder::{EncodeJob, EncodeOutput, Encoder, FfmpegEncoder};
pub use error::RecorderError;
pub use stream_recorder::{RecordingReport, RecordingStage, StreamRecorder};
pub use utils::*;

#[cfg(test)]
pub use mock_encoder::MockEncoder;
