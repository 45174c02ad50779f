use std::fs::File;
use std::path::PathBuf;

use atlas::core::config::{self, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(
    name = "atlas",
    about = "Chat with Atlas about sports, politics, and health"
)]
struct Args {
    /// Milliseconds Atlas "thinks" before replying
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Where to write the log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger isn't up yet, so hold on to any config error until it is
    let (file_config, config_error) = match config::load_config() {
        Ok(file_config) => (file_config, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            reply_delay_ms: args.delay_ms,
            log_file: args.log_file,
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Config file unusable, falling back to defaults: {}", e);
    }
    log::info!(
        "Atlas starting up (reply delay {:?}, log level {})",
        resolved.reply_delay,
        resolved.log_level
    );

    atlas::tui::run(resolved)
}
