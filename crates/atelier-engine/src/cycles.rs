//! Dependency cycle analysis over a project's task graph.
//!
//! Report-only: cycles are never rejected, they surface as tasks that block
//! each other forever. Edges run prerequisite -> dependent.

use std::collections::HashMap;

use atelier_core::entities::Task;
use rustworkx_core::petgraph::algo::{tarjan_scc, toposort};
use rustworkx_core::petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

/// Summary of the dependency structure of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleAnalysis {
    pub task_count: usize,
    pub edge_count: usize,
    /// Task ids of each cycle, sorted within the cycle; cycles sorted by first id.
    pub cycles: Vec<Vec<String>>,
    /// A valid execution order when the graph is acyclic.
    pub topological_order: Option<Vec<String>>,
}

impl CycleAnalysis {
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    #[must_use]
    pub fn in_cycle(&self, task_id: &str) -> bool {
        self.cycles.iter().any(|cycle| cycle.iter().any(|id| id == task_id))
    }
}

/// Directed graph of resolvable dependency edges.
pub struct DependencyCycles<'a> {
    graph: DiGraph<&'a str, ()>,
}

impl<'a> DependencyCycles<'a> {
    /// Build from a snapshot. Dangling dependency ids are left out.
    #[must_use]
    pub fn new(tasks: &'a [Task]) -> Self {
        let mut graph = DiGraph::new();
        let mut id_to_index: HashMap<&'a str, NodeIndex> = HashMap::new();

        for task in tasks {
            id_to_index
                .entry(task.id.as_str())
                .or_insert_with(|| graph.add_node(task.id.as_str()));
        }
        for task in tasks {
            let child = id_to_index[task.id.as_str()];
            for dep in &task.dependencies {
                if let Some(&parent) = id_to_index.get(dep.as_str()) {
                    graph.add_edge(parent, child, ());
                }
            }
        }

        Self { graph }
    }

    #[must_use]
    pub fn analyze(&self) -> CycleAnalysis {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&node| self.graph.find_edge(node, node).is_some())
            })
            .map(|component| {
                let mut ids: Vec<String> = component
                    .into_iter()
                    .map(|idx| self.graph[idx].to_string())
                    .collect();
                ids.sort();
                ids
            })
            .collect();
        cycles.sort();

        let topological_order = toposort(&self.graph, None).ok().map(|order| {
            order
                .into_iter()
                .map(|idx| self.graph[idx].to_string())
                .collect()
        });

        CycleAnalysis {
            task_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            cycles,
            topological_order,
        }
    }
}

/// Whether giving `task_id` the dependency set `dependencies` would put it on a cycle.
#[must_use]
pub fn would_create_cycle(tasks: &[Task], task_id: &str, dependencies: &[String]) -> bool {
    let mut snapshot = tasks.to_vec();
    if let Some(task) = snapshot.iter_mut().find(|task| task.id == task_id) {
        task.dependencies = dependencies.to_vec();
    } else {
        return false;
    }
    DependencyCycles::new(&snapshot).analyze().in_cycle(task_id)
}
