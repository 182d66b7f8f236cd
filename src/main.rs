use log::{debug, info};
use std::error::Error;

use clap::Parser;

mod args;
mod wimap;

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    debug!("args: {:?}", args);

    let res = wimap::config_reader::build_job(&args).and_then(|job| wimap::run_map(&job));

    if let Err(e) = res {
        eprintln!("An error occured: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
    info!("Done");
}
