//! Colonel CLI - dispatch TOML-declared commands through the routing engine
//!
//! Binary name: `colonel`

use std::process;

mod cli;

use cli::handlers::{format_error, run_cli};

fn main() {
    if let Err(err) = run_cli() {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {}", format_error(&err));
        }

        let code = err
            .downcast_ref::<colonel_core::Error>()
            .map_or(1, colonel_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}
