use clap::Parser;
use std::path::PathBuf;
use workout_core::MalformedPolicy;

pub const DEFAULT_LOG_FILTER: &str = "workout_server=debug,workout_core=info,tower_http=debug";

#[derive(Parser, Debug, Clone)]
#[command(name = "workout-server", version, about = "Workout log HTTP service")]
pub struct Config {
    /// JSON file holding every user's logs
    #[arg(long, env = "WORKOUT_DATA_FILE", default_value = "workout_data.json")]
    pub data_file: PathBuf,

    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8000")]
    pub bind_address: String,

    /// What to do with a data file that does not parse (discard | reject)
    #[arg(long, env = "WORKOUT_ON_MALFORMED", default_value_t = MalformedPolicy::Discard)]
    pub on_malformed: MalformedPolicy,

    /// tracing filter directive
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}
