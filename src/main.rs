//! Parses the dates given on the command line.
//!
//! Usage: `fieldkit [--config FILE] DATE...`

use std::process::ExitCode;

use fieldkit::convert::to_display_string;
use fieldkit::settings::Settings;
use fieldkit::value::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1).peekable();
    let config_path = if args.peek().is_some_and(|arg| arg == "--config") {
        args.next();
        args.next()
    } else {
        None
    };
    let settings = match Settings::load(config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let mut failures = 0;
    for text in args {
        match settings.parse_date(&text) {
            Ok((timestamp, layout)) => {
                info!(input = %text, layout, "parsed");
                println!("{text}\t{layout}\t{}", to_display_string(&Value::Time(timestamp)));
            }
            Err(e) => {
                warn!(input = %text, error = %e, "not a date");
                failures += 1;
            }
        }
    }
    if failures > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
