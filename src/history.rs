use serde::Serialize;

use crate::color::Color;
use crate::graph::{ColorMap, Graph, NodeId};

/** snapshot of the graph after one attempt */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    /// attempt number (starts at 1)
    pub attempt: usize,
    /// number of conflicting edges after the attempt
    pub nb_conflicts: usize,
    /// color of every node after the attempt
    pub colors: ColorMap,
}

impl AttemptRecord {
    /// snapshots the current state of the graph
    pub fn from_graph(attempt:usize, graph:&Graph) -> Self {
        Self {
            attempt,
            nb_conflicts: graph.count_conflicts(),
            colors: graph.color_map(),
        }
    }

    /// true if the attempt produced a valid coloring
    pub fn is_valid(&self) -> bool { self.nb_conflicts == 0 }
}

/**
ordered log of attempts. Records are appended during a run. Once the run is over,
a record can be replayed onto the graph, or patched after a manual recoloring.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<AttemptRecord>,
}

impl History {
    /// empty history
    pub fn new() -> Self { Self::default() }

    /// empty history able to store n records without reallocating
    pub fn with_capacity(n:usize) -> Self {
        Self { records: Vec::with_capacity(n) }
    }

    /// appends a record
    pub fn push(&mut self, record:AttemptRecord) { self.records.push(record); }

    /// number of records
    pub fn len(&self) -> usize { self.records.len() }

    /// true if no attempt has been recorded
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// i-th record (0-based)
    pub fn get(&self, i:usize) -> Option<&AttemptRecord> { self.records.get(i) }

    /// last record
    pub fn last(&self) -> Option<&AttemptRecord> { self.records.last() }

    /// iterates over the records
    pub fn iter(&self) -> std::slice::Iter<'_, AttemptRecord> { self.records.iter() }

    /// records, in attempt order
    pub fn records(&self) -> &[AttemptRecord] { &self.records }

    /** applies the colors of the i-th record to the graph and returns the record */
    pub fn replay(&self, i:usize, graph:&mut Graph) -> Option<&AttemptRecord> {
        let record = self.records.get(i)?;
        graph.apply_color_map(&record.colors);
        Some(record)
    }

    /**
    overwrites the colors and the number of conflicts of the i-th record with the
    current state of the graph (the attempt number is kept).
    Returns false if there is no such record.
    */
    pub fn patch(&mut self, i:usize, graph:&Graph) -> bool {
        match self.records.get_mut(i) {
            None => false,
            Some(record) => {
                record.colors = graph.color_map();
                record.nb_conflicts = graph.count_conflicts();
                true
            }
        }
    }

    /**
    manual recoloring: replays the i-th record, colors the node `id` with `c`,
    then patches the i-th record. Returns false if the record or the node is unknown
    (in which case nothing is modified).
    */
    pub fn recolor_node(&mut self, i:usize, graph:&mut Graph, id:NodeId, c:Color) -> bool {
        let node = match graph.index_of(id) {
            Some(node) if i < self.records.len() => node,
            _ => return false,
        };
        graph.apply_color_map(&self.records[i].colors);
        graph.set_color(node, c);
        self.patch(i, graph)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a AttemptRecord;
    type IntoIter = std::slice::Iter<'a, AttemptRecord>;

    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_manual_graph;

    fn square() -> Graph {
        build_manual_graph(&[0,1,2,3], &[(0,1),(1,2),(2,3),(3,0)])
    }

    fn coloring(colors:&[Color]) -> ColorMap {
        colors.iter().enumerate().map(|(id,c)| (id, Some(*c))).collect()
    }

    #[test]
    fn test_replay() {
        let mut g = square();
        let mut history = History::new();
        g.apply_color_map(&coloring(&[0,1,0,1]));
        history.push(AttemptRecord::from_graph(1, &g));
        g.apply_color_map(&coloring(&[0,0,0,0]));
        history.push(AttemptRecord::from_graph(2, &g));
        assert_eq!(history.len(), 2);
        assert!(history.get(0).map(|r| r.is_valid()).unwrap_or(false));
        assert_eq!(history.last().map(|r| r.nb_conflicts), Some(4));
        let replayed = history.replay(0, &mut g).cloned();
        assert_eq!(replayed.map(|r| r.attempt), Some(1));
        assert_eq!(g.count_conflicts(), 0);
        assert_eq!(g.color_map(), coloring(&[0,1,0,1]));
        assert!(history.replay(2, &mut g).is_none());
    }

    #[test]
    fn test_recolor_node_patches_only_one_record() {
        let mut g = square();
        let mut history = History::new();
        for (attempt, colors) in [[0,1,0,1],[2,1,2,1]].iter().enumerate() {
            g.apply_color_map(&coloring(colors));
            history.push(AttemptRecord::from_graph(attempt+1, &g));
        }
        assert!(history.recolor_node(0, &mut g, 1, 0));
        let patched = &history.records()[0];
        assert_eq!(patched.attempt, 1);
        assert_eq!(patched.nb_conflicts, 2);
        assert_eq!(patched.colors, coloring(&[0,0,0,1]));
        assert_eq!(history.records()[1].colors, coloring(&[2,1,2,1]));
        assert_eq!(history.records()[1].nb_conflicts, 0);
        // unknown node or record: nothing changes
        assert!(!history.recolor_node(0, &mut g, 42, 0));
        assert!(!history.recolor_node(5, &mut g, 1, 0));
        assert_eq!(history.records()[0].colors, coloring(&[0,0,0,1]));
    }

    #[test]
    fn test_serialized_as_list() {
        let mut g = square();
        g.apply_color_map(&coloring(&[0,1,0,1]));
        let mut history = History::new();
        history.push(AttemptRecord::from_graph(1, &g));
        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value[0]["attempt"], 1);
        assert_eq!(value[0]["nb_conflicts"], 0);
        assert_eq!(value[0]["colors"]["1"], 1);
    }
}
