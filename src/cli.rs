use std::path::PathBuf;

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  # Record for 60 minutes with prefix \"morning_show\"
  stream-recorder 60 morning_show

  # Record with a custom stream URL
  stream-recorder 120 evening_show --stream-url \"http://192.168.1.10:8875/?freq=11836\"

  # Override the timezone used for the file timestamp
  stream-recorder 30 test --timezone \"Europe/Berlin\"";

/// Command line arguments for a single recording run.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stream-recorder",
    version,
    about = "Record a network audio stream to a timestamped MP3 file",
    after_help = EXAMPLES,
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Recording duration in minutes
    #[arg(required_unless_present = "print_sample_config")]
    pub duration: Option<i64>,

    /// Filename prefix for the recording
    #[arg(required_unless_present = "print_sample_config")]
    pub prefix: Option<String>,

    /// Stream URL (default: from STREAM_URL env var)
    #[arg(long, value_name = "URL")]
    pub stream_url: Option<String>,

    /// Output directory for recordings (default: /recordings)
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Timezone for the file timestamp (default: from TIMEZONE env var or Europe/Vienna)
    #[arg(long, value_name = "ZONE")]
    pub timezone: Option<String>,

    /// Encoder executable (default: ffmpeg on PATH)
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<String>,

    /// TOML configuration file (default: from STREAM_RECORDER_CONFIG env var)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a commented sample configuration file and exit
    #[arg(long)]
    pub print_sample_config: bool,
}
