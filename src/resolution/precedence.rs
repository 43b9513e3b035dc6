//! Precedence graphs: which demon's move is committed before which
//!
//! Each conflict group of k demons offers k assertions ("this one first").
//! Picking one assertion per group and keeping only the acyclic picks gives
//! the admissible resolution orders.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::demons::ActorId;
use crate::resolution::conflicts::ConflictGroup;

/// `first` moves before every demon in `rest`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PrecedenceAssertion {
    pub first: ActorId,
    pub rest: BTreeSet<ActorId>,
}

/// One assertion per possible winner of the group
pub fn assertions(group: &ConflictGroup) -> Vec<PrecedenceAssertion> {
    group
        .actors
        .iter()
        .map(|first| PrecedenceAssertion {
            first: *first,
            rest: group.actors.iter().filter(|a| *a != first).copied().collect(),
        })
        .collect()
}

/// Directed acyclic graph over actor ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PrecedenceGraph {
    successors: BTreeMap<ActorId, BTreeSet<ActorId>>,
}

impl PrecedenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> BTreeSet<ActorId> {
        self.successors
            .iter()
            .flat_map(|(from, to)| std::iter::once(*from).chain(to.iter().copied()))
            .collect()
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.successors.contains_key(&id)
            || self.successors.values().any(|to| to.contains(&id))
    }

    pub fn edge_count(&self) -> usize {
        self.successors.values().map(BTreeSet::len).sum()
    }

    /// Is there a directed path from `from` to `to`?
    pub fn reaches(&self, from: ActorId, to: ActorId) -> bool {
        let mut stack = vec![from];
        let mut seen = BTreeSet::new();
        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if !seen.insert(node) {
                continue;
            }
            if let Some(next) = self.successors.get(&node) {
                stack.extend(next.iter().copied());
            }
        }
        false
    }

    /// Add `from -> to` unless `to` already precedes `from`
    ///
    /// Returns false, leaving the graph unchanged, when the edge would close a cycle.
    pub fn try_add_edge(&mut self, from: ActorId, to: ActorId) -> bool {
        if from == to || self.reaches(to, from) {
            return false;
        }
        self.successors.entry(from).or_default().insert(to);
        true
    }

    /// Add every edge of an assertion, or none if any would close a cycle
    pub fn try_assert(&mut self, assertion: &PrecedenceAssertion) -> bool {
        let mut extended = self.clone();
        for to in &assertion.rest {
            if !extended.try_add_edge(assertion.first, *to) {
                return false;
            }
        }
        *self = extended;
        true
    }

    /// Kahn's algorithm, always releasing the lowest ready id first
    pub fn topological_order(&self) -> Vec<ActorId> {
        let nodes = self.nodes();
        let mut in_degree: BTreeMap<ActorId, usize> = nodes.iter().map(|n| (*n, 0)).collect();
        for to in self.successors.values().flatten() {
            if let Some(degree) = in_degree.get_mut(to) {
                *degree += 1;
            }
        }

        let mut ready: BTreeSet<ActorId> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(nodes.len());
        while let Some(node) = ready.pop_first() {
            order.push(node);
            for next in self.successors.get(&node).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(*next);
                    }
                }
            }
        }
        order
    }
}

/// Every acyclic choice of one assertion per conflict group
///
/// Walks the Cartesian product of the groups' assertions depth first and
/// drops a prefix as soon as it closes a cycle. With no groups the result
/// is a single empty graph.
pub fn admissible_graphs(groups: &[ConflictGroup]) -> Vec<PrecedenceGraph> {
    let choices: Vec<Vec<PrecedenceAssertion>> = groups.iter().map(assertions).collect();
    let mut graphs = BTreeSet::new();
    extend_choices(&choices, PrecedenceGraph::new(), &mut graphs);
    graphs.into_iter().collect()
}

fn extend_choices(
    choices: &[Vec<PrecedenceAssertion>],
    graph: PrecedenceGraph,
    out: &mut BTreeSet<PrecedenceGraph>,
) {
    let Some((options, remaining)) = choices.split_first() else {
        out.insert(graph);
        return;
    };
    for assertion in options {
        let mut next = graph.clone();
        if next.try_assert(assertion) {
            extend_choices(remaining, next, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;

    fn group(ids: &[usize]) -> ConflictGroup {
        ConflictGroup {
            actors: ids.iter().map(|i| ActorId(*i)).collect(),
            destinations: BTreeSet::from([HexCoord::ORIGIN]),
        }
    }

    #[test]
    fn test_assertions_one_per_member() {
        let asserted = assertions(&group(&[0, 1, 2]));
        assert_eq!(asserted.len(), 3);
        assert_eq!(asserted[1].first, ActorId(1));
        assert_eq!(asserted[1].rest, BTreeSet::from([ActorId(0), ActorId(2)]));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut graph = PrecedenceGraph::new();
        assert!(graph.try_add_edge(ActorId(0), ActorId(1)));
        assert!(graph.try_add_edge(ActorId(1), ActorId(2)));
        assert!(!graph.try_add_edge(ActorId(2), ActorId(0)));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_failed_assertion_leaves_graph_unchanged() {
        let mut graph = PrecedenceGraph::new();
        graph.try_add_edge(ActorId(2), ActorId(0));
        let before = graph.clone();
        let assertion = PrecedenceAssertion {
            first: ActorId(0),
            rest: BTreeSet::from([ActorId(1), ActorId(2)]),
        };
        assert!(!graph.try_assert(&assertion));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_topological_order_respects_edges() {
        let mut graph = PrecedenceGraph::new();
        graph.try_add_edge(ActorId(3), ActorId(1));
        graph.try_add_edge(ActorId(1), ActorId(0));
        graph.try_add_edge(ActorId(3), ActorId(2));
        assert_eq!(
            graph.topological_order(),
            vec![ActorId(3), ActorId(1), ActorId(0), ActorId(2)]
        );
    }

    #[test]
    fn test_no_groups_gives_one_empty_graph() {
        let graphs = admissible_graphs(&[]);
        assert_eq!(graphs, vec![PrecedenceGraph::new()]);
        assert!(graphs[0].topological_order().is_empty());
    }

    #[test]
    fn test_single_group_each_member_wins_once() {
        let graphs = admissible_graphs(&[group(&[0, 1, 2])]);
        assert_eq!(graphs.len(), 3);
        let firsts: BTreeSet<ActorId> = graphs.iter().map(|g| g.topological_order()[0]).collect();
        assert_eq!(firsts.len(), 3);
    }

    #[test]
    fn test_overlapping_groups_drop_cyclic_picks() {
        // {0,1}, {1,2}, {0,2}: 8 picks, the two rotations are cyclic
        let graphs = admissible_graphs(&[group(&[0, 1]), group(&[1, 2]), group(&[0, 2])]);
        assert_eq!(graphs.len(), 6);
        for graph in &graphs {
            assert_eq!(graph.topological_order().len(), 3);
        }
    }
}
