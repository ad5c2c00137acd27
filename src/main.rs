use std::env;
use std::process;

use fleetsim::{cli, config::AppConfig, logging};

fn main() {
    let config = AppConfig::from_env();
    logging::init(&config.log_filter);

    let args: Vec<String> = env::args().collect();
    process::exit(cli::run_with_config(&args, &config));
}
