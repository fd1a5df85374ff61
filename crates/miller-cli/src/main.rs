// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — miller
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use miller_cli::cli::Args;
use miller_cli::dispatch;
use miller_types::params::ShapingParameters;
use std::process::ExitCode;

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let plan = match args.plan() {
        Ok(plan) => plan,
        Err(msg) => Args::command()
            .error(ErrorKind::ArgumentConflict, msg)
            .exit(),
    };

    let defaults = ShapingParameters::default();
    match dispatch::run(&plan, &defaults) {
        Ok(report) => {
            log::info!("Done: {} ({} points)", report.params, report.points);
            for path in &report.written {
                println!("wrote {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
