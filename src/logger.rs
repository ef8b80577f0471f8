use env_logger::{Builder, Env};

pub struct Logger;

impl Logger {
    pub fn init(verbosity: u8) {
        let log_filter = match verbosity {
            0 => "linkhut=info",
            1 => "linkhut=debug,info",
            _ => "linkhut=trace,info",
        };

        // Default to INFO level logs if RUST_LOG is not set.
        Builder::from_env(Env::default().default_filter_or(log_filter)).init();
    }
}
