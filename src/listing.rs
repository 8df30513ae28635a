//! Format hierarchy listings, lookups and index statistics as text.

use crate::hierarchy::ConsistencyReport;
use crate::index::IndexStats;
use crate::tree::Node;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%b %d %H:%M";

/// Applies terminal colors when enabled, passes text through otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.enabled {
            format!("{}", text.green())
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.enabled {
            format!("{}", text.red())
        } else {
            text.to_string()
        }
    }

    pub fn path(&self, label: &str, path: &Path) -> String {
        if self.enabled {
            format!("{} {}", label.blue(), path.display().yellow())
        } else {
            format!("{} {}", label, path.display())
        }
    }

    fn name(&self, node: &Node) -> String {
        if self.enabled && node.is_directory() {
            format!("{}", node.name.bold())
        } else {
            node.name.clone()
        }
    }
}

fn mode(node: &Node) -> String {
    format!("{}{}", node.kind.marker(), node.permissions)
}

/// One line of a direct listing: `<id> <mode> <name> <created>`.
pub fn format_entry(node: &Node, painter: Painter) -> String {
    format!(
        "{} {} {} {}",
        node.id,
        mode(node),
        painter.name(node),
        node.created_at.format(TIMESTAMP_FORMAT)
    )
}

/// One line of a recursive listing, indented two spaces per level.
pub fn format_tree_line(depth: usize, node: &Node, painter: Painter) -> String {
    format!(
        "{:indent$}{} {} {}",
        "",
        mode(node),
        painter.name(node),
        node.created_at.format(TIMESTAMP_FORMAT),
        indent = depth * 2
    )
}

/// Detail block for an index lookup.
pub fn format_lookup(node: &Node, path: &Path, attached: bool, painter: Painter) -> String {
    let mut out = format_entry(node, painter);
    out.push_str(&format!("\n  size: {} bytes", node.size));
    out.push_str(&format!("\n  path: {}", path.display()));
    if !attached {
        out.push_str("\n  (removed from hierarchy; index entry retained)");
    }
    out
}

pub fn format_stats_table(stats: &IndexStats, nodes: usize, attached: usize) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Indexed ids".to_string(), stats.entries.to_string()]);
    table.add_row(vec!["Attached nodes".to_string(), attached.to_string()]);
    table.add_row(vec![
        "Stale entries".to_string(),
        nodes.saturating_sub(attached).to_string(),
    ]);
    table.add_row(vec!["Minimum degree".to_string(), stats.min_degree.to_string()]);
    table.add_row(vec!["Height".to_string(), stats.height.to_string()]);
    table.add_row(vec!["Index nodes".to_string(), stats.index_nodes.to_string()]);
    table.add_row(vec!["Root splits".to_string(), stats.root_splits.to_string()]);
    table.to_string()
}

pub fn format_consistency_report(report: &ConsistencyReport, painter: Painter) -> String {
    let mut out = String::new();
    if report.is_consistent() {
        out.push_str(&painter.heading("Hierarchy and index are consistent"));
    } else {
        out.push_str(&painter.error(&format!(
            "{} consistency problem(s) found",
            report.problems.len()
        )));
        for problem in &report.problems {
            out.push_str(&format!("\n  - {}", problem));
        }
    }
    out.push_str(&format!(
        "\n  nodes: {}, attached: {}, stale index entries: {}",
        report.nodes, report.attached, report.stale_index_entries
    ));
    out
}
