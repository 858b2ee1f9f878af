//! `svcat describe plan`
//!
//! Resolves a plan by external name or UUID, prints its details and the
//! instances provisioned from it, and with `--traverse` also prints the
//! parent class and broker.

use crate::catalog::ServiceCatalog;
use crate::cli::output;
use crate::SvcatError;
use std::io::Write;

/// Options for `svcat describe plan`
#[derive(Debug, Clone, Default)]
pub struct DescribePlanCmd {
    /// Follow plan -> class -> broker
    pub traverse: bool,
    /// Treat the argument as a UUID instead of an external name
    pub lookup_by_uuid: bool,
}

impl DescribePlanCmd {
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
        tracing::debug!(key, by_uuid = self.lookup_by_uuid, traverse = self.traverse, "describing plan");

        let plan = if self.lookup_by_uuid {
            catalog.retrieve_plan_by_id(key)?
        } else {
            catalog.retrieve_plan_by_name(key)?
        };

        // Plans only carry the class UUID; the details need its external name.
        let class = catalog.retrieve_class_by_plan(&plan)?;
        output::write_plan_details(w, &plan, &class)?;

        let instances = catalog.retrieve_instances_by_plan(&plan)?;
        output::write_associated_instances(w, &instances)?;

        if self.traverse {
            let broker = catalog.retrieve_broker_by_class(&class)?;
            output::write_parent_class(w, &class)?;
            output::write_parent_broker(w, &broker)?;
        }

        Ok(())
    }
}
