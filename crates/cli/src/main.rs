//! The main function for the Bibliotheca command-line shell
use std::process::ExitCode;

#[allow(clippy::print_stderr, reason = "No tracing loaded at this point")]
fn main() -> ExitCode {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("Failed to load environment variables! Error: {error}");
            return ExitCode::FAILURE;
        }
    }
    bibliotheca_lib::run()
}
