// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanlayer — turn a scanned image into a searchable one-page PDF.
//
// Entry point. Initialises logging, parses arguments, and runs the pipeline.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use scanlayer_core::human_errors::humanize_error;

use cli::Args;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    tracing::info!(input = %args.input.display(), "Scanlayer starting");

    match args.pipeline().and_then(|pipeline| pipeline.run(&args.input, &args.output)) {
        Ok(_) => {
            println!("PDF saved at {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Conversion failed");
            eprintln!("{}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}
