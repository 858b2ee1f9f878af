//! `svcat describe class`
//!
//! Resolves a class by external name or UUID, prints its details and plans,
//! and with `--traverse` also prints the broker that offers it followed by
//! the plans table again.

use crate::catalog::ServiceCatalog;
use crate::cli::output;
use crate::SvcatError;
use std::io::Write;

/// Options for `svcat describe class`
#[derive(Debug, Clone, Default)]
pub struct DescribeClassCmd {
    /// Follow class -> broker
    pub traverse: bool,
    /// Treat the argument as a UUID instead of an external name
    pub lookup_by_uuid: bool,
}

impl DescribeClassCmd {
    /// Run the command for the positional argument, if any
    pub fn run(
        &self,
        catalog: &dyn ServiceCatalog,
        w: &mut dyn Write,
        arg: Option<&str>,
    ) -> Result<(), SvcatError> {
        let key = arg.ok_or(SvcatError::MissingArgument)?;
        self.describe(catalog, w, key)
    }

    fn describe(&self, catalog: &dyn ServiceCatalog, w: &mut dyn Write, key: &str) -> Result<(), SvcatError> {
        tracing::debug!(key, by_uuid = self.lookup_by_uuid, traverse = self.traverse, "describing class");

        let class = if self.lookup_by_uuid {
            catalog.retrieve_class_by_id(key)?
        } else {
            catalog.retrieve_class_by_name(key)?
        };
        output::write_class_details(w, &class)?;

        let plans = catalog.retrieve_plans_by_class(&class)?;
        output::write_associated_plans(w, &plans)?;

        if self.traverse {
            let broker = catalog.retrieve_broker_by_class(&class)?;
            output::write_parent_broker(w, &broker)?;
            output::write_associated_plans(w, &plans)?;
        }

        Ok(())
    }
}
