//! The executable of the route table generator.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use peregrinec_driver::Arguments;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::new().filter_or("PEREGRINEC_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let arguments = Arguments::parse();
    log::debug!("{arguments:?}");

    peregrinec_driver::run(&arguments, &mut std::io::stderr())
}
