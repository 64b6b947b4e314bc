//! Convert a private key between hexadecimal, wif and bip-0038 encrypted
//! forms, showing the related public key and addresses.

use tracing_subscriber::EnvFilter;
use wifcrypt::{handle_arguments, init_clap};

/// Whirlpool of the project.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
        )
        .with_writer(std::io::stderr)
        .init();

    handle_arguments(init_clap().get_matches()).unwrap_or_else(|err| {
        eprintln!("\x1b[31m\x1b[1merror\x1b[m: {}", err);
        std::process::exit(err.status());
    });
}
