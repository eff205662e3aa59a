// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Activity dependency graphs
//!
//! `dependsOn` only resolves against siblings in the same activity list.
//! Each list gets its own graph; unknown names and cycles are reported.

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

use crate::pipeline::{walk, Activity, ActivityVisitor, PipelineDocument, Visit};
use crate::report::{RuleId, ValidationIssue};

/// Dependency graph of one sibling list
pub struct ActivityGraph<'a> {
    activities: &'a [Activity],
    graph: DiGraph<usize, ()>,
    name_to_index: HashMap<&'a str, NodeIndex>,
    /// (activity, missing dependency) pairs in document order
    unknown: Vec<(&'a str, &'a str)>,
}

impl<'a> ActivityGraph<'a> {
    /// Build the graph of a sibling list
    ///
    /// Edges run from a dependency to its dependent. With duplicate names
    /// the first activity wins.
    pub fn build(activities: &'a [Activity]) -> Self {
        let mut graph = DiGraph::new();
        let mut name_to_index = HashMap::new();

        for (idx, activity) in activities.iter().enumerate() {
            let node = graph.add_node(idx);
            name_to_index.entry(activity.name.as_str()).or_insert(node);
        }

        let mut unknown = Vec::new();
        for (idx, activity) in activities.iter().enumerate() {
            let node = NodeIndex::new(idx);
            for dependency in &activity.depends_on {
                match name_to_index.get(dependency.activity.as_str()) {
                    Some(dep_node) => {
                        if !graph.contains_edge(*dep_node, node) {
                            graph.add_edge(*dep_node, node, ());
                        }
                    }
                    None => unknown.push((activity.name.as_str(), dependency.activity.as_str())),
                }
            }
        }

        Self {
            activities,
            graph,
            name_to_index,
            unknown,
        }
    }

    pub fn unknown_dependencies(&self) -> &[(&'a str, &'a str)] {
        &self.unknown
    }

    /// Groups of activities that depend on each other in a loop
    ///
    /// Groups are ordered by their first member; members follow document order.
    pub fn cycles(&self) -> Vec<Vec<&'a str>> {
        let mut cycles: Vec<Vec<usize>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut members: Vec<usize> = scc.iter().map(|n| self.graph[*n]).collect();
                members.sort_unstable();
                members
            })
            .collect();
        cycles.sort();

        cycles
            .into_iter()
            .map(|members| {
                members
                    .into_iter()
                    .map(|idx| self.activities[idx].name.as_str())
                    .collect()
            })
            .collect()
    }

    /// Activities in an order that respects `dependsOn`, `None` with a cycle
    pub fn topological_order(&self) -> Option<Vec<&'a Activity>> {
        toposort(&self.graph, None)
            .ok()
            .map(|nodes| nodes.into_iter().map(|n| &self.activities[self.graph[n]]).collect())
    }

    /// Activities that must finish before `name`
    pub fn dependencies(&self, name: &str) -> Option<Vec<&'a str>> {
        let node = self.name_to_index.get(name)?;
        let mut deps: Vec<usize> = self
            .graph
            .neighbors_directed(*node, petgraph::Direction::Incoming)
            .map(|n| self.graph[n])
            .collect();
        deps.sort_unstable();
        Some(
            deps.into_iter()
                .map(|idx| self.activities[idx].name.as_str())
                .collect(),
        )
    }

    /// Generate Mermaid diagram
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        for (idx, activity) in self.activities.iter().enumerate() {
            out.push_str(&format!(
                "    n{}[\"{} ({})\"]\n",
                idx, activity.name, activity.activity_type
            ));
        }

        for (from, to) in self.sorted_edges() {
            out.push_str(&format!("    n{} --> n{}\n", from, to));
        }

        out
    }

    /// Generate DOT diagram
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for activity in self.activities {
            out.push_str(&format!(
                "    \"{}\" [label=\"{}\\n{}\"];\n",
                activity.name, activity.name, activity.activity_type
            ));
        }

        for (from, to) in self.sorted_edges() {
            out.push_str(&format!(
                "    \"{}\" -> \"{}\";\n",
                self.activities[from].name, self.activities[to].name
            ));
        }

        out.push_str("}\n");
        out
    }

    /// Generate text representation of execution order
    ///
    /// Falls back to document order when the graph has a cycle.
    pub fn to_text(&self) -> String {
        let order = self
            .topological_order()
            .unwrap_or_else(|| self.activities.iter().collect());
        let mut out = String::new();

        for (i, activity) in order.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({})",
                i + 1,
                activity.name,
                activity.activity_type
            ));

            let deps = self.dependencies(&activity.name).unwrap_or_default();
            if !deps.is_empty() {
                out.push_str(&format!(" [depends: {}]", deps.join(", ")));
            }

            let nested: usize = activity.nested().iter().map(|list| list.len()).sum();
            if nested > 0 {
                out.push_str(&format!(" [contains: {}]", nested));
            }

            out.push('\n');
        }

        out
    }

    fn sorted_edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(from, to)| (self.graph[from], self.graph[to]))
            .collect();
        edges.sort_unstable();
        edges
    }
}

/// Check `dependsOn` references and activity name uniqueness
pub fn check_dependencies(pipeline: &PipelineDocument) -> Vec<ValidationIssue> {
    let mut checker = DependencyChecker {
        pipeline: &pipeline.name,
        seen: HashSet::new(),
        issues: Vec::new(),
    };
    walk(&pipeline.activities, &mut checker);
    checker.issues
}

struct DependencyChecker<'a> {
    pipeline: &'a str,
    seen: HashSet<&'a str>,
    issues: Vec<ValidationIssue>,
}

impl<'a> ActivityVisitor<'a> for DependencyChecker<'a> {
    fn visit(&mut self, visit: Visit<'a>) {
        let name = visit.activity.name.as_str();
        if !self.seen.insert(name) {
            self.issues.push(
                ValidationIssue::new(
                    RuleId::DuplicateActivityName,
                    self.pipeline,
                    format!("Activity name '{}' is used more than once in the pipeline", name),
                )
                .with_activity(name),
            );
        }
    }

    fn enter_list(&mut self, list: &'a [Activity], parent: Option<&'a Activity>) {
        let graph = ActivityGraph::build(list);
        let scope = match parent {
            Some(p) => format!("inside '{}'", p.name),
            None => "at the pipeline top level".to_string(),
        };

        for (activity, dependency) in graph.unknown_dependencies() {
            self.issues.push(
                ValidationIssue::new(
                    RuleId::UnknownDependency,
                    self.pipeline,
                    format!(
                        "dependsOn references '{}', which is not a sibling activity {}",
                        dependency, scope
                    ),
                )
                .with_activity(*activity),
            );
        }

        for members in graph.cycles() {
            self.issues.push(
                ValidationIssue::new(
                    RuleId::CircularDependency,
                    self.pipeline,
                    format!(
                        "Circular dependency {}: {}",
                        scope,
                        members.join(" → ")
                    ),
                )
                .with_activity(members[0]),
            );
        }
    }
}
