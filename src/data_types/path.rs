use anyhow::ensure;
use itertools::Itertools;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::data_types::node::Node;

/// Label used for case samples in case/control analysis
pub const CASE_LABEL: &str = "case";
/// Label used for control samples in case/control analysis
pub const CTRL_LABEL: &str = "ctrl";

/// An ordered walk through graph nodes for a single genome (or a piece of one).
/// Full genome paths come from the graph loaders; supporting subpaths are freshly built from them.
/// Equality, hashing, and ordering only use the name, the genotype, and the ordered node IDs.
#[derive(Clone, Debug)]
pub struct Path {
    /// Sample or genome name
    name: String,
    /// Optional genotype (haplotype) index
    genotype: Option<u32>,
    /// Optional phenotype label, e.g. "case" or "ctrl"
    label: Option<String>,
    /// The ordered nodes traversed
    nodes: Vec<Arc<Node>>,
    /// Prefix sums of node lengths, `offsets[i]` is the sequence length before node `i`; length is `nodes.len()+1`
    offsets: Vec<usize>,
    /// Sorted node positions that start a new, disconnected walk (e.g. the next contig); never contains 0
    breaks: Vec<usize>,
}

impl Path {
    /// Constructor, the derived sequence offsets are computed here once.
    /// # Arguments
    /// * `name` - the genome name
    /// * `genotype` - optional genotype index
    /// * `label` - optional case/control style label
    /// * `nodes` - the ordered nodes of the path
    pub fn new(name: String, genotype: Option<u32>, label: Option<String>, nodes: Vec<Arc<Node>>) -> Self {
        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut total = 0;
        offsets.push(total);
        for n in nodes.iter() {
            total += n.len();
            offsets.push(total);
        }
        Self { name, genotype, label, nodes, offsets, breaks: vec![] }
    }

    /// Builds one genome path out of several disconnected walks, such as one walk per contig.
    /// The walks are stored in order, but no two of them are adjacent, see `crosses_break`.
    /// Empty walks are ignored.
    pub fn from_walks(name: String, genotype: Option<u32>, label: Option<String>, walks: Vec<Vec<Arc<Node>>>) -> Self {
        let mut nodes = vec![];
        let mut breaks = vec![];
        for walk in walks.into_iter().filter(|w| !w.is_empty()) {
            if !nodes.is_empty() {
                breaks.push(nodes.len());
            }
            nodes.extend(walk);
        }
        let mut path = Self::new(name, genotype, label, nodes);
        path.breaks = breaks;
        path
    }

    /// Builds a new path containing the nodes from `first` to `last`, inclusive.
    /// Name, genotype, and label are carried over from this path.
    /// # Errors
    /// * if the range is inverted or out of bounds
    pub fn subpath(&self, first: usize, last: usize) -> anyhow::Result<Path> {
        ensure!(first <= last && last < self.nodes.len(),
            "Invalid subpath range {first}..={last} for path {} with {} nodes", self.identifier(), self.nodes.len());
        let mut path = Path::new(
            self.name.clone(), self.genotype, self.label.clone(),
            self.nodes[first..=last].to_vec()
        );
        path.breaks = self.breaks.iter()
            .filter(|&&b| b > first && b <= last)
            .map(|&b| b - first)
            .collect();
        Ok(path)
    }

    /// Returns a copy of this path with a new label
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// Total number of intervening bases strictly between node positions `i` and `j` along this path.
    /// Adjacent positions have a gap of 0.
    pub fn gap(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < self.nodes.len());
        self.offsets[j] - self.offsets[i + 1]
    }

    /// Returns true if positions `i < j` are on different walks, so they are not connected along this path
    pub fn crosses_break(&self, i: usize, j: usize) -> bool {
        // first break after i
        let next = self.breaks.partition_point(|&b| b <= i);
        self.breaks.get(next).is_some_and(|&b| b <= j)
    }

    /// Number of disconnected walks on this path
    pub fn num_walks(&self) -> usize {
        if self.nodes.is_empty() {
            0
        } else {
            self.breaks.len() + 1
        }
    }

    /// The concatenated sequence of all nodes on the path
    pub fn sequence(&self) -> String {
        self.nodes.iter().map(|n| n.sequence()).collect()
    }

    /// Total sequence length in bases
    pub fn sequence_len(&self) -> usize {
        self.offsets[self.nodes.len()]
    }

    /// The ordered node IDs
    pub fn node_ids(&self) -> Vec<i64> {
        self.nodes.iter().map(|n| n.id()).collect()
    }

    /// The bracketed node ID list, e.g. "[1,2,5]"
    pub fn node_id_list(&self) -> String {
        format!("[{}]", self.nodes.iter().map(|n| n.id()).join(","))
    }

    /// Identifier combining name, genotype and label: `<name>.<genotype>.<label>`; missing values are empty
    pub fn identifier(&self) -> String {
        let genotype = self.genotype.map(|g| g.to_string()).unwrap_or_default();
        let label = self.label.as_deref().unwrap_or_default();
        format!("{}.{}.{}", self.name, genotype, label)
    }

    /// Returns true if this path belongs to the same genome as `other`, i.e. same name and genotype
    pub fn same_genome(&self, other: &Path) -> bool {
        self.name == other.name && self.genotype == other.genotype
    }

    pub fn is_case(&self) -> bool {
        self.label.as_deref() == Some(CASE_LABEL)
    }

    pub fn is_control(&self) -> bool {
        self.label.as_deref() == Some(CTRL_LABEL)
    }

    // getters
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genotype(&self) -> Option<u32> {
        self.genotype
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn nodes(&self) -> &[Arc<Node>] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name &&
            self.genotype == other.genotype &&
            self.nodes.len() == other.nodes.len() &&
            self.nodes.iter().zip(other.nodes.iter()).all(|(a, b)| a.id() == b.id())
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.genotype.hash(state);
        for n in self.nodes.iter() {
            n.id().hash(state);
        }
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Path {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
            .then_with(|| self.genotype.cmp(&other.genotype))
            .then_with(|| {
                self.nodes.iter().map(|n| n.id())
                    .cmp(other.nodes.iter().map(|n| n.id()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(entries: &[(i64, &str)]) -> Vec<Arc<Node>> {
        entries.iter().map(|(id, seq)| Arc::new(Node::new(*id, seq.to_string()))).collect()
    }

    #[test]
    fn test_sequence_and_gaps() {
        let path = Path::new(
            "s1".to_string(), Some(0), Some("case".to_string()),
            nodes(&[(1, "AC"), (2, "GGG"), (3, "T"), (4, "AAAA")])
        );
        assert_eq!(path.sequence(), "ACGGGTAAAA");
        assert_eq!(path.sequence_len(), 10);
        assert_eq!(path.gap(0, 1), 0);
        assert_eq!(path.gap(0, 2), 3);
        assert_eq!(path.gap(0, 3), 4);
        assert_eq!(path.gap(1, 3), 1);
        assert_eq!(path.identifier(), "s1.0.case");
        assert!(path.is_case());
        assert!(!path.is_control());
    }

    #[test]
    fn test_subpath() {
        let path = Path::new("s1".to_string(), None, None, nodes(&[(1, "AC"), (2, "GGG"), (3, "T")]));
        let sub = path.subpath(1, 2).unwrap();
        assert_eq!(sub.node_ids(), vec![2, 3]);
        assert_eq!(sub.sequence(), "GGGT");
        assert_eq!(sub.node_id_list(), "[2,3]");
        assert_eq!(sub.identifier(), "s1..");
        assert!(sub.same_genome(&path));
        assert!(path.subpath(2, 1).is_err());
        assert!(path.subpath(0, 3).is_err());
    }

    #[test]
    fn test_equality() {
        let p1 = Path::new("s1".to_string(), Some(0), Some("case".to_string()), nodes(&[(1, "A"), (2, "C")]));
        // different label, same name, genotype, and nodes
        let p2 = Path::new("s1".to_string(), Some(0), None, nodes(&[(1, "A"), (2, "C")]));
        let p3 = Path::new("s2".to_string(), Some(0), None, nodes(&[(1, "A"), (2, "C")]));
        let p4 = Path::new("s1".to_string(), Some(0), None, nodes(&[(1, "A")]));
        assert_eq!(p1, p2);
        assert_ne!(p1, p3);
        assert_ne!(p1, p4);
        assert!(p4 < p1);
        assert!(p1 < p3);
    }

    #[test]
    fn test_walk_breaks() {
        let walks = vec![
            nodes(&[(1, "A"), (2, "C")]),
            vec![],
            nodes(&[(3, "G")]),
            nodes(&[(4, "T"), (5, "TT")]),
        ];
        let path = Path::from_walks("s1".to_string(), Some(0), None, walks);
        assert_eq!(path.node_ids(), vec![1, 2, 3, 4, 5]);
        assert_eq!(path.num_walks(), 3);
        assert!(!path.crosses_break(0, 1));
        assert!(path.crosses_break(1, 2));
        assert!(path.crosses_break(0, 4));
        assert!(path.crosses_break(2, 3));
        assert!(!path.crosses_break(3, 4));

        // breaks are carried into subpaths, relative to the new start
        let sub = path.subpath(1, 3).unwrap();
        assert_eq!(sub.num_walks(), 3);
        assert!(sub.crosses_break(0, 1));
        let single = path.subpath(3, 4).unwrap();
        assert_eq!(single.num_walks(), 1);
        assert_eq!(Path::new("s1".to_string(), None, None, vec![]).num_walks(), 0);
    }

    #[test]
    fn test_haplotypes_are_distinct() {
        let hap0 = Path::new("s1".to_string(), Some(0), None, nodes(&[(1, "A"), (2, "C")]));
        let hap1 = Path::new("s1".to_string(), Some(1), None, nodes(&[(1, "A"), (2, "C")]));
        let unphased = Path::new("s1".to_string(), None, None, nodes(&[(1, "A"), (2, "C")]));
        assert_ne!(hap0, hap1);
        assert_ne!(hap0, unphased);
        assert!(unphased < hap0);
        assert!(hap0 < hap1);

        let set: std::collections::BTreeSet<Path> = [hap0, hap1, unphased].into_iter().collect();
        assert_eq!(set.len(), 3);
    }
}
