use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Initializes the global logger. Records carry a timestamp and severity and
/// go to stderr, or append to `log_file` when one is given. The filter comes
/// from the LOG_LEVEL environment variable, defaulting to info.
pub fn init(log_file: Option<&Path>) {
    let env = Env::default().filter_or("LOG_LEVEL", "info");
    let mut builder = Builder::from_env(env);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("could not open log file");
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
}
