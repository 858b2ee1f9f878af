//! Command line arguments for svcat.
//!
//! Global flags select the cluster connection and log verbosity; the
//! `describe` subcommands take one positional NAME (or UUID with `--uuid`).

use crate::catalog::client::DEFAULT_TIMEOUT_SECS;
use crate::catalog::kubeconfig::KubeconfigOptions;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "svcat",
    about = "Inspect service-catalog classes, plans, brokers and instances",
    version,
    after_help = "\
EXAMPLES:
    svcat describe class azure-mysqldb
    svcat describe class --uuid 997b8372-8dac-40ac-ae65-758b4a5075a5
    svcat describe plan standard800 --traverse"
)]
pub struct Cli {
    /// Path to the kubeconfig file (default: $KUBECONFIG or ~/.kube/config)
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (default: current-context)
    #[arg(long, global = true, value_name = "NAME")]
    pub context: Option<String>,

    /// Timeout for each API request, in seconds
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout: u64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn kubeconfig_options(&self) -> KubeconfigOptions {
        KubeconfigOptions {
            path: self.kubeconfig.clone(),
            context: self.context.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Show details of a specific resource
    #[command(subcommand)]
    Describe(DescribeCommand),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum DescribeCommand {
    /// Show details of a specific class
    #[command(
        visible_aliases = ["classes", "cl"],
        after_help = "\
EXAMPLES:
    svcat describe class azure-mysqldb
    svcat describe class --uuid 997b8372-8dac-40ac-ae65-758b4a5075a5"
    )]
    Class(DescribeArgs),

    /// Show details of a specific plan
    #[command(
        visible_aliases = ["plans", "pl"],
        after_help = "\
EXAMPLES:
    svcat describe plan standard800
    svcat describe plan --uuid 08e4b43a-36bc-447e-a81f-8202b13e339c"
    )]
    Plan(DescribeArgs),
}

impl DescribeCommand {
    pub fn args(&self) -> &DescribeArgs {
        match self {
            DescribeCommand::Class(args) | DescribeCommand::Plan(args) => args,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct DescribeArgs {
    /// External name of the resource, or its UUID with --uuid
    pub name: Option<String>,

    /// Whether or not to traverse from plan -> class -> broker
    #[arg(short, long)]
    pub traverse: bool,

    /// Whether or not to look up by UUID (the default is by name)
    #[arg(short, long)]
    pub uuid: bool,
}
