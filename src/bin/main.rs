use std::process;

use chrono::{DateTime, Utc};
use clap::Parser;
use log::{error, info};

use stream_recorder::{
    Cli, FfmpegEncoder, RecorderError, RecorderSettings, RecordingConfig, StreamRecorder,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Timestamp for the file name is taken at invocation start
    let started_at = Utc::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            process::exit(code);
        }
    };

    if cli.print_sample_config {
        print!("{}", RecorderSettings::generate_sample_config());
        return;
    }

    if let Err(e) = run(&cli, started_at) {
        error!("{e}");
        if let RecorderError::EncoderFailed { stderr, .. } = &e {
            error!("stderr: {}", stderr.trim_end());
        }
        process::exit(1);
    }
}

fn run(cli: &Cli, started_at: DateTime<Utc>) -> Result<(), RecorderError> {
    let (Some(duration), Some(prefix)) = (cli.duration, cli.prefix.as_deref()) else {
        return Err(RecorderError::Config(
            "Duration and prefix are required".to_string(),
        ));
    };

    let settings = RecorderSettings::load(cli)?;
    let config = RecordingConfig::resolve(&settings, duration, prefix)?;
    info!("Timezone: {}", config.timezone_name());

    let mut recorder = StreamRecorder::new(FfmpegEncoder::new(config.ffmpeg_path()));
    match recorder.record(&config, started_at) {
        // An alias failure was already logged as a warning and does not
        // change the outcome
        Ok(_report) => Ok(()),
        Err(e) => {
            if let Some(stage) = recorder.failed_at() {
                error!("Recording failed during {stage}");
            }
            Err(e)
        }
    }
}
