//! Path segmentation by floor
//!
//! Splits a route into maximal same-floor runs ("steps") and marks the
//! direction of travel at every floor change.

use serde::Serialize;

use crate::node::{Floor, FloorLookup, NodeId};

/// A run of consecutive path nodes on one floor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// `None` for a node without a floor attribute
    pub floor: Option<Floor>,
    pub nodes: Vec<NodeId>,
}

/// Direction of a floor change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    /// One side of the change has no floor attribute
    Unknown,
}

/// Floor change between step `after_step` and the step that follows it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub after_step: usize,
    /// Last node of step `after_step`
    pub anchor: NodeId,
    pub from: Option<Floor>,
    pub to: Option<Floor>,
    pub direction: Direction,
}

/// Steps partitioning a path, plus one transition per adjacent step pair
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segmentation {
    pub steps: Vec<Step>,
    pub transitions: Vec<Transition>,
}

impl Segmentation {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Floors visited, in order (one entry per step)
    pub fn floors(&self) -> Vec<Option<Floor>> {
        self.steps.iter().map(|s| s.floor).collect()
    }
}

fn direction(from: Option<Floor>, to: Option<Floor>) -> Direction {
    match (from, to) {
        (Some(a), Some(b)) if b > a => Direction::Up,
        (Some(_), Some(_)) => Direction::Down,
        _ => Direction::Unknown,
    }
}

/// Split `path` into steps by floor.
///
/// A new step starts whenever a node's floor differs from the running step's.
/// A node with no floor is a discontinuity: it always forms a step of its own.
pub fn segment_by_floor<F>(path: &[NodeId], floors: &F) -> Segmentation
where
    F: FloorLookup + ?Sized,
{
    let mut steps: Vec<Step> = Vec::new();

    for node in path {
        let floor = floors.floor_of(node);
        match steps.last_mut() {
            Some(step) if floor.is_some() && step.floor == floor => {
                step.nodes.push(node.clone());
            }
            _ => steps.push(Step {
                floor,
                nodes: vec![node.clone()],
            }),
        }
    }

    let transitions = steps
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let anchor = pair[0].nodes.last()?.clone();
            Some(Transition {
                after_step: i,
                anchor,
                from: pair[0].floor,
                to: pair[1].floor,
                direction: direction(pair[0].floor, pair[1].floor),
            })
        })
        .collect();

    Segmentation { steps, transitions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn path(ids: &[&str]) -> Vec<NodeId> {
        ids.iter().map(|s| NodeId::from(*s)).collect()
    }

    fn floors(entries: &[(&str, i32)]) -> HashMap<NodeId, Floor> {
        entries
            .iter()
            .map(|(id, f)| (NodeId::from(*id), Floor(*f)))
            .collect()
    }

    #[test]
    fn test_single_floor_is_one_step() {
        let lookup = floors(&[("A", 2), ("B", 2), ("C", 2)]);
        let seg = segment_by_floor(&path(&["A", "B", "C"]), &lookup);
        assert_eq!(seg.steps.len(), 1);
        assert_eq!(seg.steps[0].nodes, path(&["A", "B", "C"]));
        assert_eq!(seg.steps[0].floor, Some(Floor(2)));
        assert!(seg.transitions.is_empty());
    }

    #[test]
    fn test_alternating_floors() {
        let lookup = floors(&[("A", 0), ("B", 0), ("C", 1), ("D", 1), ("E", 0)]);
        let seg = segment_by_floor(&path(&["A", "B", "C", "D", "E"]), &lookup);

        assert_eq!(seg.floors(), vec![Some(Floor(0)), Some(Floor(1)), Some(Floor(0))]);
        assert_eq!(seg.steps[0].nodes, path(&["A", "B"]));
        assert_eq!(seg.steps[1].nodes, path(&["C", "D"]));
        assert_eq!(seg.steps[2].nodes, path(&["E"]));

        assert_eq!(seg.transitions.len(), 2);
        assert_eq!(seg.transitions[0].direction, Direction::Up);
        assert_eq!(seg.transitions[0].anchor, NodeId::from("B"));
        assert_eq!(seg.transitions[1].direction, Direction::Down);
        assert_eq!(seg.transitions[1].anchor, NodeId::from("D"));
        assert_eq!(seg.transitions[1].after_step, 1);
    }

    #[test]
    fn test_missing_floor_forces_its_own_step() {
        // "S1" and "S2" have no floor attribute
        let lookup = floors(&[("A", 0), ("B", 1)]);
        let seg = segment_by_floor(&path(&["A", "S1", "S2", "B"]), &lookup);

        assert_eq!(seg.floors(), vec![Some(Floor(0)), None, None, Some(Floor(1))]);
        assert!(seg.steps[1..3].iter().all(|s| s.nodes.len() == 1));
        let dirs: Vec<Direction> = seg.transitions.iter().map(|t| t.direction).collect();
        assert_eq!(dirs, vec![Direction::Unknown; 3]);
    }

    #[test]
    fn test_missing_floor_between_same_floor_splits() {
        let lookup = floors(&[("A", 0), ("C", 0)]);
        let seg = segment_by_floor(&path(&["A", "B", "C"]), &lookup);
        assert_eq!(seg.steps.len(), 3);
        assert_eq!(seg.steps[2].floor, Some(Floor(0)));
    }

    #[test]
    fn test_steps_partition_the_path() {
        let lookup = floors(&[("A", 0), ("B", 1), ("C", 1), ("D", 3), ("E", -1)]);
        let input = path(&["A", "B", "C", "D", "E"]);
        let seg = segment_by_floor(&input, &lookup);

        let flattened: Vec<NodeId> = seg.steps.iter().flat_map(|s| s.nodes.clone()).collect();
        assert_eq!(flattened, input);
        for pair in seg.steps.windows(2) {
            assert_ne!(pair[0].floor, pair[1].floor);
        }
        assert_eq!(seg.transitions.len(), seg.steps.len() - 1);
    }

    #[test]
    fn test_empty_path() {
        let seg = segment_by_floor(&[], &floors(&[]));
        assert!(seg.is_empty());
        assert!(seg.transitions.is_empty());
    }
}
