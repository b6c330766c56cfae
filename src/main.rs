use std::process;

use clap::Parser;
use log::{error, info};

use daybook::{App, Cli, Config, SystemClock};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    let mut config = match Config::load_or_create(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(journals_dir) = cli.journals_dir {
        config.journals_dir = journals_dir;
    }

    let mut app = App::new(config, config_path, Box::new(SystemClock), cli.verbose);

    if let Err(e) = app.run(cli.command) {
        error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
