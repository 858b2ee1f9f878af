//! Output formatting for svcat.
//!
//! Provides a small column-aligned table writer and the section writers used
//! by the describe commands.
//!
//! # Layout
//!
//! - List tables: upper-cased header row, a dashed rule, then one line per row
//! - Details tables: borderless `Key:  value` pairs
//! - Sections other than the primary details start with a blank line and a
//!   `Title:` line
//!
//! Columns are separated by two spaces and padded to the widest cell.
//! Trailing whitespace is trimmed from every line. Empty lists print a
//! "No ... defined" line instead of an empty table.

use crate::catalog::types::{
    condition_status, ClusterServiceBroker, ClusterServiceClass, ClusterServicePlan, ServiceInstance,
};
use std::io::{self, Write};

const INDENT: &str = "  ";
const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq)]
enum TableStyle {
    List,
    Details,
}

/// Column-aligned text table
#[derive(Debug, Clone)]
pub struct Table {
    style: TableStyle,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Table with a header row, for collections
    pub fn list() -> Self {
        Table {
            style: TableStyle::List,
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Key/value table, for a single resource
    pub fn details() -> Self {
        Table {
            style: TableStyle::Details,
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn set_header(&mut self, headers: &[&str]) {
        self.headers = headers.iter().map(|h| h.to_string()).collect();
    }

    pub fn append(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn append_bulk(&mut self, rows: Vec<Vec<String>>) {
        self.rows.extend(rows);
    }

    #[cfg(test)]
    fn headers(&self) -> &[String] {
        &self.headers
    }

    #[cfg(test)]
    fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Render the table into a string
    pub fn render_to_string(&self) -> String {
        let show_header = self.style == TableStyle::List && !self.headers.is_empty();
        let columns = self
            .rows
            .iter()
            .map(|r| r.len())
            .chain(std::iter::once(if show_header { self.headers.len() } else { 0 }))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0usize; columns];
        if show_header {
            for (i, header) in self.headers.iter().enumerate() {
                widths[i] = widths[i].max(header.chars().count());
            }
        }
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut output = String::new();
        if show_header {
            let upper: Vec<String> = self.headers.iter().map(|h| h.to_uppercase()).collect();
            push_line(&mut output, &upper, &widths);
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            push_line(&mut output, &rule, &widths);
        }
        for row in &self.rows {
            push_line(&mut output, row, &widths);
        }
        output
    }

    /// Render the table to a writer
    pub fn render(&self, w: &mut dyn Write) -> io::Result<()> {
        w.write_all(self.render_to_string().as_bytes())
    }
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::from(INDENT);
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    output.push_str(line.trim_end());
    output.push('\n');
}

/// Set the plan-list headers on `table`
pub fn cluster_service_plan_headers(table: &mut Table) {
    table.set_header(&["Name", "Description", "UUID", "Class Name", "Class UUID"]);
}

/// Append one plan row to `table`.
///
/// Call `cluster_service_plan_headers` on the table first.
pub fn append_cluster_service_plan(table: &mut Table, plan: &ClusterServicePlan) {
    table.append(vec![
        plan.spec.external_name.clone(),
        plan.spec.description.clone(),
        plan.metadata.name.clone(),
        plan.spec.cluster_service_broker_name.clone(),
        plan.spec.cluster_service_class_ref.name.clone(),
    ]);
}

fn detail(key: &str, value: impl Into<String>) -> Vec<String> {
    vec![key.to_string(), value.into()]
}

fn write_section_title(w: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}:", title)
}

pub fn write_class_details(w: &mut dyn Write, class: &ClusterServiceClass) -> io::Result<()> {
    let mut t = Table::details();
    t.append_bulk(vec![
        detail("Name:", class.spec.external_name.as_str()),
        detail("Description:", class.spec.description.as_str()),
        detail("UUID:", class.metadata.name.as_str()),
        detail("Bindable:", class.spec.bindable.to_string()),
        detail("Plan Updatable:", class.spec.plan_updatable.to_string()),
        detail("Tags:", class.spec.tags.join(", ")),
        detail("Broker:", class.spec.cluster_service_broker_name.as_str()),
    ]);
    t.render(w)
}

pub fn write_associated_plans(w: &mut dyn Write, plans: &[ClusterServicePlan]) -> io::Result<()> {
    write_section_title(w, "Plans")?;
    if plans.is_empty() {
        return writeln!(w, "{}No plans defined", INDENT);
    }

    let mut t = Table::list();
    cluster_service_plan_headers(&mut t);
    for plan in plans {
        append_cluster_service_plan(&mut t, plan);
    }
    t.render(w)
}

pub fn write_parent_broker(w: &mut dyn Write, broker: &ClusterServiceBroker) -> io::Result<()> {
    write_section_title(w, "Broker")?;
    let mut t = Table::details();
    t.append_bulk(vec![
        detail("Name:", broker.metadata.name.as_str()),
        detail("URL:", broker.spec.url.as_str()),
        detail("Status:", condition_status(&broker.status.conditions)),
    ]);
    t.render(w)
}

pub fn write_plan_details(
    w: &mut dyn Write,
    plan: &ClusterServicePlan,
    class: &ClusterServiceClass,
) -> io::Result<()> {
    let mut t = Table::details();
    t.append_bulk(vec![
        detail("Name:", plan.spec.external_name.as_str()),
        detail("Description:", plan.spec.description.as_str()),
        detail("UUID:", plan.metadata.name.as_str()),
        detail("Free:", plan.spec.free.to_string()),
        detail("Class:", class.spec.external_name.as_str()),
    ]);
    t.render(w)
}

pub fn write_associated_instances(w: &mut dyn Write, instances: &[ServiceInstance]) -> io::Result<()> {
    write_section_title(w, "Instances")?;
    if instances.is_empty() {
        return writeln!(w, "{}No instances defined", INDENT);
    }

    let mut t = Table::list();
    t.set_header(&["Name", "Namespace", "Status"]);
    for instance in instances {
        t.append(vec![
            instance.metadata.name.clone(),
            instance.metadata.namespace.clone().unwrap_or_default(),
            condition_status(&instance.status.conditions),
        ]);
    }
    t.render(w)
}

pub fn write_parent_class(w: &mut dyn Write, class: &ClusterServiceClass) -> io::Result<()> {
    write_section_title(w, "Class")?;
    let mut t = Table::details();
    t.append_bulk(vec![
        detail("Name:", class.spec.external_name.as_str()),
        detail("UUID:", class.metadata.name.as_str()),
        detail("Description:", class.spec.description.as_str()),
    ]);
    t.render(w)
}
