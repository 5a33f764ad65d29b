//! Campaignweb main entry point

use campaignweb_api::start_server;
use campaignweb_config::Config;
use campaignweb_core::Campaigns;
use campaignweb_parser::FileSourceReader;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "campaignweb")]
#[command(author = "Campaignweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Campaign finance dashboard for candidate revenue and expense files", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            for suggestion in e.suggestions() {
                eprintln!("  - {}", suggestion);
            }
            return Err(e.into());
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();
    log::info!("Config loaded: data path={}", config.data.path.display());

    let campaigns = match Campaigns::discover(config, Arc::new(FileSourceReader)) {
        Ok(campaigns) => Arc::new(campaigns),
        Err(e) => {
            log::error!("{}", e.to_details());
            return Err(e.into());
        }
    };

    let rt = Runtime::new()?;
    rt.block_on(start_server(campaigns))?;

    Ok(())
}
