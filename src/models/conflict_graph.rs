//! Conflict graph over subjects.
//!
//! Two subjects are adjacent iff at least one student is enrolled in both.
//! The graph is built by closing each student's subject set into a clique
//! and taking the union over all students, so construction costs the sum
//! over students of C(k, 2) for k enrolled subjects.
//!
//! Every subject of the enrollment is a node, including subjects with no
//! conflicts (degree 0).

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::enrollment::{Enrollment, SubjectId};

/// An undirected conflict edge, stored with `source < target`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConflictEdge {
    /// Lexicographically smaller endpoint.
    pub source: SubjectId,
    /// Lexicographically larger endpoint.
    pub target: SubjectId,
}

/// Undirected, symmetric, loop-free conflict graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConflictGraph {
    adjacency: BTreeMap<SubjectId, BTreeSet<SubjectId>>,
}

impl ConflictGraph {
    /// Builds the conflict graph of an enrollment.
    pub fn build(enrollment: &Enrollment) -> Self {
        let mut adjacency: BTreeMap<SubjectId, BTreeSet<SubjectId>> = enrollment
            .subjects()
            .map(|s| (s.to_string(), BTreeSet::new()))
            .collect();

        for subjects in enrollment.student_subjects().values() {
            let subjects: Vec<&SubjectId> = subjects.iter().collect();
            for (i, a) in subjects.iter().enumerate() {
                for b in &subjects[i + 1..] {
                    if let Some(neighbors) = adjacency.get_mut(a.as_str()) {
                        neighbors.insert((*b).clone());
                    }
                    if let Some(neighbors) = adjacency.get_mut(b.as_str()) {
                        neighbors.insert((*a).clone());
                    }
                }
            }
        }

        Self { adjacency }
    }

    /// Builds a graph directly from an edge list.
    ///
    /// Self-loops are dropped; both endpoints become nodes.
    pub fn from_edges<I, S, T>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut adjacency: BTreeMap<SubjectId, BTreeSet<SubjectId>> = BTreeMap::new();
        for (a, b) in edges {
            let (a, b) = (a.into(), b.into());
            adjacency.entry(a.clone()).or_default();
            adjacency.entry(b.clone()).or_default();
            if a == b {
                continue;
            }
            adjacency.entry(a.clone()).or_default().insert(b.clone());
            adjacency.entry(b).or_default().insert(a);
        }
        Self { adjacency }
    }

    /// Adds isolated nodes (no-op for subjects already present).
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for s in subjects {
            self.adjacency.entry(s.into()).or_default();
        }
        self
    }

    /// Subject → conflicting subjects.
    pub fn adjacency(&self) -> &BTreeMap<SubjectId, BTreeSet<SubjectId>> {
        &self.adjacency
    }

    /// Neighbors of a subject (empty for unknown subjects).
    pub fn neighbors<'a>(&'a self, subject: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.adjacency
            .get(subject)
            .into_iter()
            .flat_map(|n| n.iter().map(String::as_str))
    }

    /// Number of conflicting subjects.
    pub fn degree(&self, subject: &str) -> usize {
        self.adjacency.get(subject).map_or(0, BTreeSet::len)
    }

    /// Whether two subjects conflict.
    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    /// All subjects, in identifier order.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Number of nodes, isolated subjects included.
    pub fn num_subjects(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges: half the sum of adjacency sizes.
    pub fn num_edges(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Each undirected edge exactly once, ordered.
    pub fn edges(&self) -> Vec<ConflictEdge> {
        self.adjacency
            .iter()
            .flat_map(|(a, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |b| a < *b)
                    .map(move |b| ConflictEdge {
                        source: a.clone(),
                        target: b.clone(),
                    })
            })
            .collect()
    }

    /// Whether the graph has no subjects.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Enrollment {
        Enrollment::from_pairs(vec![("S1", "A"), ("S1", "B"), ("S2", "B"), ("S2", "C")])
    }

    #[test]
    fn test_build_chain() {
        let g = ConflictGraph::build(&chain());
        assert!(g.are_adjacent("A", "B"));
        assert!(g.are_adjacent("B", "C"));
        assert!(!g.are_adjacent("A", "C"));
        assert_eq!(g.degree("B"), 2);
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn test_clique_per_student() {
        let e = Enrollment::from_pairs(vec![("S1", "A"), ("S1", "B"), ("S1", "C"), ("S1", "D")]);
        let g = ConflictGraph::build(&e);
        assert_eq!(g.num_edges(), 6);
        for s in ["A", "B", "C", "D"] {
            assert_eq!(g.degree(s), 3);
        }
    }

    #[test]
    fn test_symmetric_no_self_loops() {
        let e = Enrollment::from_pairs(vec![
            ("S1", "A"),
            ("S1", "B"),
            ("S2", "A"),
            ("S2", "C"),
            ("S3", "B"),
            ("S3", "C"),
            ("S3", "D"),
        ]);
        let g = ConflictGraph::build(&e);
        for (a, neighbors) in g.adjacency() {
            assert!(!neighbors.contains(a));
            for b in neighbors {
                assert!(g.are_adjacent(b, a));
            }
        }
    }

    #[test]
    fn test_isolated_subject_is_node() {
        let e = Enrollment::from_pairs(vec![("S1", "A"), ("S2", "B")]);
        let g = ConflictGraph::build(&e);
        assert_eq!(g.num_subjects(), 2);
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.degree("A"), 0);
    }

    #[test]
    fn test_edges_listed_once() {
        let g = ConflictGraph::build(&chain());
        let edges = g.edges();
        assert_eq!(
            edges,
            vec![
                ConflictEdge {
                    source: "A".into(),
                    target: "B".into()
                },
                ConflictEdge {
                    source: "B".into(),
                    target: "C".into()
                },
            ]
        );
    }

    #[test]
    fn test_from_edges_drops_loops() {
        let g = ConflictGraph::from_edges(vec![("A", "A"), ("A", "B")]).with_subjects(["C"]);
        assert_eq!(g.num_subjects(), 3);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.degree("A"), 1);
    }

    #[test]
    fn test_empty() {
        let g = ConflictGraph::build(&Enrollment::new());
        assert!(g.is_empty());
        assert_eq!(g.num_edges(), 0);
        assert!(g.edges().is_empty());
        assert_eq!(g.neighbors("A").count(), 0);
    }
}
