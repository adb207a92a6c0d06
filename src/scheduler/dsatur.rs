//! DSatur (saturation-degree) greedy coloring.
//!
//! # Algorithm
//!
//! 1. `degree(s)` = number of conflicting subjects, fixed for the run.
//! 2. `saturation(s)` = number of distinct slots already used by colored
//!    neighbors, initially 0.
//! 3. Repeatedly take the uncolored subject with the highest saturation,
//!    then highest degree, then smallest identifier.
//! 4. Give it the smallest slot not used by any colored neighbor.
//! 5. Recompute the saturation of each uncolored neighbor from scratch and
//!    push a fresh queue entry for it.
//!
//! The queue uses lazy deletion: entries are never updated in place, and
//! entries for subjects colored in the meantime are discarded when popped.
//! Saturation only grows, so the freshest entry for a subject always
//! outranks its older ones.
//!
//! # Complexity
//! O((V + E) · Δ · log E) with Δ the maximum degree, dominated by the
//! per-neighbor saturation rescans.
//!
//! # Reference
//! Brélaz (1979), "New Methods to Color the Vertices of a Graph"

use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

use crate::models::{ConflictGraph, Schedule, Slot};

/// A queue entry. Ordered so that the max-heap pops the most constrained
/// subject first, with the lexicographically smallest ID winning ties.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate<'a> {
    saturation: usize,
    degree: usize,
    subject: &'a str,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.saturation
            .cmp(&other.saturation)
            .then_with(|| self.degree.cmp(&other.degree))
            .then_with(|| other.subject.cmp(self.subject))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Saturation-degree greedy slot assigner.
///
/// Deterministic: the same graph and subject set always yield the same
/// schedule. The slot count is a heuristic upper bound on the chromatic
/// number, not a guaranteed minimum.
///
/// # Example
///
/// ```
/// use exam_schedule::models::ConflictGraph;
/// use exam_schedule::scheduler::DsaturScheduler;
///
/// let graph = ConflictGraph::from_edges(vec![("A", "B"), ("B", "C")]);
/// let schedule = DsaturScheduler::new().color(&graph, ["A", "B", "C"]);
///
/// assert_eq!(schedule.slot_of("B"), Some(1));
/// assert_eq!(schedule.slot_of("A"), Some(2));
/// assert_eq!(schedule.slot_of("C"), Some(2));
/// assert_eq!(schedule.total_slots(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DsaturScheduler;

impl DsaturScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Colors every subject of the graph.
    pub fn color_graph(&self, graph: &ConflictGraph) -> Schedule {
        self.color(graph, graph.subjects())
    }

    /// Assigns a slot to each subject in `subjects`.
    ///
    /// Subjects absent from the graph are treated as conflict-free.
    /// Neighbors outside the subject set are ignored: they never receive a
    /// slot and never constrain one.
    pub fn color<'a, I>(&self, graph: &ConflictGraph, subjects: I) -> Schedule
    where
        I: IntoIterator<Item = &'a str>,
    {
        let subjects: BTreeSet<&str> = subjects.into_iter().collect();
        if subjects.is_empty() {
            return Schedule::new();
        }

        // Neighborhoods restricted to the subject set; degree is static.
        let adjacency: HashMap<&str, Vec<&str>> = subjects
            .iter()
            .map(|&s| {
                let neighbors = graph
                    .neighbors(s)
                    .filter(|n| subjects.contains(n))
                    .collect();
                (s, neighbors)
            })
            .collect();
        let degree: HashMap<&str, usize> =
            adjacency.iter().map(|(&s, n)| (s, n.len())).collect();

        let mut heap: BinaryHeap<Candidate> = subjects
            .iter()
            .map(|&s| Candidate {
                saturation: 0,
                degree: degree[s],
                subject: s,
            })
            .collect();

        let mut slot_of: HashMap<&str, Slot> = HashMap::with_capacity(subjects.len());
        let mut stale_pops: usize = 0;

        while let Some(Candidate { subject, .. }) = heap.pop() {
            if slot_of.contains_key(subject) {
                stale_pops += 1;
                continue;
            }

            let neighbors = &adjacency[subject];
            let used: HashSet<Slot> = neighbors
                .iter()
                .filter_map(|n| slot_of.get(n).copied())
                .collect();
            let slot = first_free_slot(&used);
            slot_of.insert(subject, slot);
            trace!("subject {} -> slot {}", subject, slot);

            for &neighbor in neighbors {
                if slot_of.contains_key(neighbor) {
                    continue;
                }
                heap.push(Candidate {
                    saturation: saturation(neighbor, &adjacency, &slot_of),
                    degree: degree[neighbor],
                    subject: neighbor,
                });
            }
        }

        debug!(
            "DSatur colored {} subjects with {} slots ({} stale queue entries skipped)",
            slot_of.len(),
            slot_of.values().copied().max().unwrap_or(0),
            stale_pops
        );

        Schedule::from_assignments(slot_of)
    }
}

/// Distinct slots among a subject's colored neighbors.
fn saturation(
    subject: &str,
    adjacency: &HashMap<&str, Vec<&str>>,
    slot_of: &HashMap<&str, Slot>,
) -> usize {
    adjacency[subject]
        .iter()
        .filter_map(|n| slot_of.get(n))
        .collect::<HashSet<_>>()
        .len()
}

/// Smallest positive slot not in `used`.
fn first_free_slot(used: &HashSet<Slot>) -> Slot {
    let mut slot = 1;
    while used.contains(&slot) {
        slot += 1;
    }
    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Enrollment;
    use crate::validation::validate;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn random_enrollment(rng: &mut SmallRng, students: usize, subjects: usize) -> Enrollment {
        let mut pairs = Vec::new();
        for st in 0..students {
            let k = rng.random_range(1..=subjects.min(4));
            for _ in 0..k {
                let sub = rng.random_range(0..subjects);
                pairs.push((format!("S{st:03}"), format!("SUB{sub:02}")));
            }
        }
        Enrollment::from_pairs(pairs)
    }

    #[test]
    fn test_chain_trace() {
        let g = ConflictGraph::from_edges(vec![("A", "B"), ("B", "C")]);
        let s = DsaturScheduler::new().color(&g, ["A", "B", "C"]);
        assert_eq!(s, Schedule::from_assignments(vec![("A", 2), ("B", 1), ("C", 2)]));
        assert_eq!(s.total_slots(), 2);
    }

    #[test]
    fn test_tie_break_by_id() {
        // Equal degrees throughout; saturation ties fall back to the ID.
        let g = ConflictGraph::from_edges(vec![("P", "Q"), ("Q", "R"), ("P", "R")]);
        let s = DsaturScheduler::new().color_graph(&g);
        assert_eq!(s.slot_of("P"), Some(1));
        assert_eq!(s.slot_of("Q"), Some(2));
        assert_eq!(s.slot_of("R"), Some(3));
    }

    #[test]
    fn test_saturation_before_degree() {
        // Star around H plus a path A-B-C-D. After H (degree 4) takes
        // slot 1, A outranks B and C (same degree, higher saturation).
        let g = ConflictGraph::from_edges(vec![
            ("H", "A"),
            ("H", "X"),
            ("H", "Y"),
            ("H", "Z"),
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
        ]);
        let s = DsaturScheduler::new().color_graph(&g);
        assert_eq!(s.slot_of("H"), Some(1));
        assert_eq!(s.slot_of("A"), Some(2));
        assert_eq!(s.slot_of("B"), Some(1));
        assert!(s.is_proper_coloring(&g));
        assert_eq!(s.total_slots(), 2);
    }

    #[test]
    fn test_odd_cycle_needs_three() {
        let g = ConflictGraph::from_edges(vec![
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "E"),
            ("E", "A"),
        ]);
        let s = DsaturScheduler::new().color_graph(&g);
        assert!(s.is_proper_coloring(&g));
        assert_eq!(s.total_slots(), 3);
    }

    #[test]
    fn test_bipartite_uses_two() {
        // DSatur is exact on bipartite graphs.
        let g = ConflictGraph::from_edges(vec![
            ("A1", "B1"),
            ("A1", "B2"),
            ("A2", "B2"),
            ("A2", "B3"),
            ("A3", "B1"),
            ("A3", "B3"),
        ]);
        let s = DsaturScheduler::new().color_graph(&g);
        assert!(s.is_proper_coloring(&g));
        assert_eq!(s.total_slots(), 2);
    }

    #[test]
    fn test_isolated_subjects_share_slot_one() {
        let g = ConflictGraph::default().with_subjects(["A", "B", "C"]);
        let s = DsaturScheduler::new().color_graph(&g);
        assert!(s.iter().all(|(_, slot)| slot == 1));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_subject_missing_from_graph() {
        let g = ConflictGraph::from_edges(vec![("A", "B")]);
        let s = DsaturScheduler::new().color(&g, ["A", "B", "NEW"]);
        assert_eq!(s.slot_of("NEW"), Some(1));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_subset_ignores_outside_neighbors() {
        let g = ConflictGraph::from_edges(vec![("A", "B"), ("B", "C")]);
        let s = DsaturScheduler::new().color(&g, ["A", "C"]);
        assert_eq!(s.slot_of("A"), Some(1));
        assert_eq!(s.slot_of("C"), Some(1));
        assert_eq!(s.slot_of("B"), None);
    }

    #[test]
    fn test_empty() {
        let s = DsaturScheduler::new().color_graph(&ConflictGraph::default());
        assert!(s.is_empty());
        assert_eq!(s.total_slots(), 0);
    }

    #[test]
    fn test_clique_uses_n_slots() {
        let e = Enrollment::from_pairs((0..6).map(|i| ("S1".to_string(), format!("C{i}"))));
        let g = ConflictGraph::build(&e);
        let s = DsaturScheduler::new().color_graph(&g);
        assert_eq!(s.total_slots(), 6);
    }

    #[test]
    fn test_first_free_slot() {
        assert_eq!(first_free_slot(&HashSet::new()), 1);
        assert_eq!(first_free_slot(&HashSet::from([1, 2, 4])), 3);
        assert_eq!(first_free_slot(&HashSet::from([2, 3])), 1);
    }

    #[test]
    fn test_candidate_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(Candidate {
            saturation: 0,
            degree: 5,
            subject: "A",
        });
        heap.push(Candidate {
            saturation: 1,
            degree: 1,
            subject: "Z",
        });
        heap.push(Candidate {
            saturation: 1,
            degree: 1,
            subject: "M",
        });
        heap.push(Candidate {
            saturation: 1,
            degree: 2,
            subject: "Y",
        });

        let order: Vec<&str> = std::iter::from_fn(|| heap.pop().map(|c| c.subject)).collect();
        assert_eq!(order, vec!["Y", "M", "Z", "A"]);
    }

    #[test]
    fn test_random_enrollments_are_conflict_free() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let e = random_enrollment(&mut rng, 60, 25);
            let g = ConflictGraph::build(&e);
            let s = DsaturScheduler::new().color_graph(&g);

            assert!(s.is_complete(e.subjects()));
            assert_eq!(s.len(), e.num_subjects());
            assert!(s.is_proper_coloring(&g));
            assert!(validate(&e, &s).is_empty());

            // Greedy bound: never more than max degree + 1 slots.
            let max_degree = g.subjects().map(|x| g.degree(x)).max().unwrap_or(0);
            assert!(s.total_slots() as usize <= max_degree + 1);
        }
    }

    #[test]
    fn test_deterministic() {
        let mut rng = SmallRng::seed_from_u64(9);
        let e = random_enrollment(&mut rng, 200, 40);
        let g = ConflictGraph::build(&e);
        let first = DsaturScheduler::new().color_graph(&g);
        for _ in 0..5 {
            assert_eq!(DsaturScheduler::new().color_graph(&g), first);
        }
        // Input order of the subject set does not matter.
        let mut reversed: Vec<&str> = g.subjects().collect();
        reversed.reverse();
        assert_eq!(DsaturScheduler::new().color(&g, reversed), first);
    }
}
