use std::ffi::OsString;

use ffroute::config::Config;

fn main() {
    ffroute::logging::init_tracing();

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    std::process::exit(ffroute::run_with_config(&Config::config_path(), &args));
}
