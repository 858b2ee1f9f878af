//! CLI module for argument parsing, logging and output formatting.

pub mod args;
pub mod logging;
pub mod output;

use crate::catalog::ServiceCatalog;
use crate::commands::describe_class::DescribeClassCmd;
use crate::commands::describe_plan::DescribePlanCmd;
use crate::SvcatError;
use args::DescribeCommand;
use std::io::Write;

/// Dispatch a parsed `describe` subcommand
pub fn run_describe(
    command: &DescribeCommand,
    catalog: &dyn ServiceCatalog,
    w: &mut dyn Write,
) -> Result<(), SvcatError> {
    let args = command.args();
    match command {
        DescribeCommand::Class(_) => DescribeClassCmd {
            traverse: args.traverse,
            lookup_by_uuid: args.uuid,
        }
        .run(catalog, w, args.name.as_deref()),
        DescribeCommand::Plan(_) => DescribePlanCmd {
            traverse: args.traverse,
            lookup_by_uuid: args.uuid,
        }
        .run(catalog, w, args.name.as_deref()),
    }
}
