use clap::Parser;
use juvo::core::config::{self, CliOverrides, JuvoConfig};
use juvo::{AdviceBackend, Page, tui};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "juvo", about = "JUVO Health USSD and voice simulator")]
struct Args {
    /// Where menus and advice come from (overrides config and JUVO_ADVICE_SOURCE)
    #[arg(short, long, value_enum)]
    source: Option<AdviceBackend>,

    /// Page shown at startup
    #[arg(short, long, value_enum)]
    page: Option<Page>,

    /// Disable the voice page
    #[arg(long)]
    no_voice: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to juvo.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("juvo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::error!("{}, falling back to defaults", e);
        JuvoConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            advice_source: args.source,
            start_page: args.page,
            no_voice: args.no_voice,
        },
    );

    log::info!(
        "JUVO starting up with {:?} advice source ({})",
        resolved.advice_source,
        resolved.api_base_url
    );

    tui::run(resolved)
}
