// src/main.rs

use std::process::ExitCode;

use baxoo::{cli, logging, render_error, run};

// Every exit path returns through here.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("baxoo error: {err:?}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}
