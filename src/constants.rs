pub const DEFAULT_OUTPUT_DIR: &str = "/recordings";
pub const DEFAULT_TIMEZONE: &str = "Europe/Vienna";
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

// Fixed encoder profile: audio only, MP3 at 48 kHz / 192 kbit/s
pub const OUTPUT_EXTENSION: &str = "mp3";
pub const OUTPUT_FORMAT: &str = "mp3";
pub const AUDIO_CODEC: &str = "libmp3lame";
pub const AUDIO_SAMPLE_RATE: u32 = 48_000;
pub const AUDIO_BITRATE: &str = "192k";

pub const SECONDS_PER_MINUTE: u64 = 60;

/// `strftime` pattern for recording timestamps, e.g. "20240115_143005".
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// Environment variable names
pub const ENV_STREAM_URL: &str = "STREAM_URL";
pub const ENV_TIMEZONE: &str = "TIMEZONE";
pub const ENV_CONFIG: &str = "STREAM_RECORDER_CONFIG";
