use clap::Parser;

pub mod validation;

use validation::check_readable_file;

#[must_use]
pub fn args_checks() -> Args {
    Args::parse()
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Game snapshot json. When given, print the result and exit instead of serving.
    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        value_parser = check_readable_file
    )]
    pub snapshot: Option<String>,

    /// With --snapshot, print settlements rather than live status
    #[arg(long, default_value_t = false)]
    pub settle: bool,

    #[arg(short = 'b', long, default_value = "0.0.0.0")]
    pub bind: String,

    #[arg(short = 'p', long, default_value_t = 8081)]
    pub port: u16,

    /// off, error, warn, info, debug or trace
    #[arg(short = 'l', long, default_value = "info")]
    pub log_level: log::LevelFilter,
}
