//! svcat CLI entry point
//!
//! Inspects service-catalog resources on a Kubernetes cluster.

use clap::Parser;
use svcat::catalog::client::ApiClient;
use svcat::cli::args::{Cli, Command, DescribeCommand};
use svcat::cli::logging::init_tracing;
use svcat::cli::run_describe;
use svcat::version::get_build_info;
use svcat::SvcatError;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    // Usage errors exit with clap's own status (2)
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Version => {
            println!("{}", get_build_info());
            Ok(())
        }
        Command::Describe(ref describe) => run(&cli, describe),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, describe: &DescribeCommand) -> Result<(), SvcatError> {
    // Report a missing argument before touching the kubeconfig
    if describe.args().name.is_none() {
        return Err(SvcatError::MissingArgument);
    }

    let client = ApiClient::from_kubeconfig_with_timeout(
        &cli.kubeconfig_options(),
        Duration::from_secs(cli.request_timeout),
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run_describe(describe, &client, &mut out);
    out.flush()?;
    result
}
