//! Dependency graph built from task titles, with cycle detection.
//!
//! Nodes are the distinct titles of a batch. Each node has an edge to every
//! dependency that is itself a title in the batch; references to unknown
//! titles are dropped, so they can never close a cycle.
//!
//! When several tasks share a title the node keeps the position of the first
//! occurrence and the dependency list of the last one (last write wins).

use std::collections::HashMap;

use crate::Task;

/// Traversal state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Directed graph of title -> dependency edges for one batch.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    titles: Vec<String>,
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Build the graph for a batch of tasks.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
        let mut titles = Vec::new();
        let mut owners: Vec<&Task> = Vec::new();

        for task in tasks {
            match index.get(task.title.as_str()) {
                Some(&node) => owners[node] = task,
                None => {
                    index.insert(task.title.as_str(), titles.len());
                    titles.push(task.title.clone());
                    owners.push(task);
                }
            }
        }

        let edges = owners
            .iter()
            .map(|task| {
                task.dependencies
                    .iter()
                    .filter_map(|dep| index.get(dep.as_str()).copied())
                    .collect()
            })
            .collect();

        Self { titles, edges }
    }

    /// Number of distinct titles.
    pub fn node_count(&self) -> usize {
        self.titles.len()
    }

    /// Number of edges between titles present in the batch.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Check whether the graph contains at least one directed cycle.
    pub fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Find a cycle and return its titles in traversal order.
    ///
    /// The first title is repeated at the end, so a self-loop on `A` yields
    /// `["A", "A"]`. Runs in O(V + E) with an explicit stack.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut marks = vec![Mark::Unvisited; self.titles.len()];
        // (node, index of the next edge to follow)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..self.titles.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::InProgress;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                let Some(&target) = self.edges[node].get(next) else {
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                match marks[target] {
                    Mark::Unvisited => {
                        marks[target] = Mark::InProgress;
                        stack.push((target, 0));
                    }
                    Mark::InProgress => return Some(self.cycle_path(&stack, target)),
                    Mark::Done => {}
                }
            }
        }

        None
    }

    fn cycle_path(&self, stack: &[(usize, usize)], start: usize) -> Vec<String> {
        let from = stack
            .iter()
            .position(|&(node, _)| node == start)
            .unwrap_or(0);
        stack[from..]
            .iter()
            .map(|&(node, _)| self.titles[node].clone())
            .chain(std::iter::once(self.titles[start].clone()))
            .collect()
    }
}

/// Check whether the dependency graph of `tasks` contains a cycle.
pub fn detect_cycle(tasks: &[Task]) -> bool {
    DependencyGraph::from_tasks(tasks).has_cycle()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, deps: &[&str]) -> Task {
        deps.iter()
            .fold(Task::new(title), |task, dep| task.with_dependency(*dep))
    }

    #[test]
    fn test_empty_batch_has_no_cycle() {
        assert!(!detect_cycle(&[]));
    }

    #[test]
    fn test_no_dependencies_has_no_cycle() {
        let tasks = vec![task("A", &[]), task("B", &[]), task("C", &[])];
        assert!(!detect_cycle(&tasks));
    }

    #[test]
    fn test_mutual_dependency_is_cycle() {
        let tasks = vec![task("A", &["B"]), task("B", &["A"])];
        assert!(detect_cycle(&tasks));
    }

    #[test]
    fn test_self_dependency_is_cycle() {
        let tasks = vec![task("A", &["A"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert!(graph.has_cycle());
        assert_eq!(
            graph.find_cycle(),
            Some(vec!["A".to_string(), "A".to_string()])
        );
    }

    #[test]
    fn test_unknown_dependency_is_ignored() {
        let tasks = vec![task("A", &["Ghost"]), task("B", &["A", "Ghost"])];
        let graph = DependencyGraph::from_tasks(&tasks);

        assert!(!graph.has_cycle());
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_diamond_is_not_cycle() {
        let tasks = vec![
            task("A", &["B", "C"]),
            task("B", &["D"]),
            task("C", &["D"]),
            task("D", &[]),
        ];
        assert!(!detect_cycle(&tasks));
    }

    #[test]
    fn test_cycle_in_disconnected_component() {
        let tasks = vec![
            task("A", &["B"]),
            task("B", &[]),
            task("X", &["Y"]),
            task("Y", &["Z"]),
            task("Z", &["X"]),
        ];
        let cycle = DependencyGraph::from_tasks(&tasks).find_cycle().unwrap();

        assert_eq!(cycle, vec!["X", "Y", "Z", "X"]);
    }

    #[test]
    fn test_duplicate_title_last_write_wins() {
        // The second "A" replaces the first one's dependencies.
        let tasks = vec![task("A", &["B"]), task("B", &["A"]), task("A", &[])];
        assert!(!detect_cycle(&tasks));

        let tasks = vec![task("A", &[]), task("B", &["A"]), task("A", &["B"])];
        assert!(detect_cycle(&tasks));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 100_000;
        let mut tasks: Vec<Task> = (0..n)
            .map(|i| Task::new(format!("t{i}")).with_dependency(format!("t{}", i + 1)))
            .collect();
        assert!(!detect_cycle(&tasks));

        tasks.push(Task::new(format!("t{n}")).with_dependency("t0"));
        assert!(detect_cycle(&tasks));
    }
}
