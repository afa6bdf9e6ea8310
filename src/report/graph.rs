use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::lineage_engine::records::{FilterRecord, FilterType, LineageRecord};

/// Table-level dependency graph assembled from extracted records.
///
/// Nodes are qualified table names, CTE names, and source file labels;
/// edges point from a table to whatever reads it.
pub struct LineageGraph {
    graph: DiGraph<String, ()>,
    node_index: HashMap<String, NodeIndex>,
    file_nodes: HashSet<String>,
}

impl LineageGraph {
    pub fn from_records(lineage: &[LineageRecord], filters: &[FilterRecord]) -> Self {
        let mut builder = Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            file_nodes: HashSet::new(),
        };

        for record in lineage {
            let table = qualified_name(&record.schema, &record.table);
            if table.is_empty() {
                continue;
            }
            if record.field.is_empty() {
                builder.file_nodes.insert(record.file.clone());
                builder.add_edge(&table, &record.file);
            } else if let Some(cte_name) = cte_marker(&record.field) {
                builder.add_edge(&table, cte_name);
            }
        }

        for record in filters {
            if record.filter_type == FilterType::JoinOn
                && !record.table.is_empty()
                && !record.join_table.is_empty()
                && record.table != record.join_table
            {
                let side = qualified_name(&record.schema, &record.table);
                builder.add_edge(&side, &record.join_table);
            }
        }

        builder
    }

    fn get_or_create_node(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.node_index.get(name) {
            *idx
        } else {
            let idx = self.graph.add_node(name.to_string());
            self.node_index.insert(name.to_string(), idx);
            idx
        }
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        let from_idx = self.get_or_create_node(from);
        let to_idx = self.get_or_create_node(to);
        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render the graph in dot format for Graphviz.
    pub fn to_dot(&self) -> String {
        let mut result = String::from("digraph lineage {\n");
        result.push_str("  rankdir=LR;\n");
        result.push_str("  node [shape=box];\n");

        for idx in self.graph.node_indices() {
            let name = &self.graph[idx];
            if self.file_nodes.contains(name) {
                result.push_str(&format!(
                    "  \"{}\" [style=filled, fillcolor=lightblue];\n",
                    name
                ));
            } else {
                result.push_str(&format!("  \"{}\";\n", name));
            }
        }

        for edge in self.graph.edge_references() {
            result.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                self.graph[edge.source()],
                self.graph[edge.target()]
            ));
        }

        result.push_str("}\n");
        result
    }
}

fn qualified_name(schema: &str, table: &str) -> String {
    if schema.is_empty() {
        table.to_string()
    } else {
        format!("{}.{}", schema, table)
    }
}

/// The CTE name inside a `(name)` field marker, if the field is one.
fn cte_marker(field: &str) -> Option<&str> {
    field.strip_prefix('(').and_then(|rest| rest.strip_suffix(')'))
}
