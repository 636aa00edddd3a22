use std::io;

use clap::Parser;
use env_logger::Env;
use privat_rates::{Cli, run};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Cli::parse();

    if let Err(err) = run(&args, &mut io::stdout().lock()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
