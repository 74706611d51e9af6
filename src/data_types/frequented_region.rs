use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use crate::data_types::graph::Graph;
use crate::data_types::node_set::NodeSet;
use crate::data_types::path::Path;
use crate::support_solver::{compute_support, SupportError};
use crate::util::fisher::ContingencyTable;

/// A node cluster plus every genome subpath that substantially traverses it.
/// The node set is the identity; support, average length, and subpaths are all derived from it given (graph, alpha, kappa).
#[derive(Clone, Debug)]
pub struct FrequentedRegion {
    /// The cluster of nodes
    nodes: NodeSet,
    /// Supporting subpaths, de-duplicated by name and node list
    subpaths: BTreeSet<Path>,
    /// Penetrance parameter these subpaths were computed with
    alpha: f64,
    /// Maximum insertion parameter these subpaths were computed with
    kappa: usize,
    /// Number of supporting subpaths
    support: usize,
    /// Reverse-complement support, not computed and always 0
    rc_support: usize,
    /// Mean sequence length of the supporting subpaths; 0.0 when there is no support
    avg_length: f64,
}

impl FrequentedRegion {
    /// Builds a region by running the support computation against every path in the graph.
    /// # Arguments
    /// * `graph` - the full graph, only the paths are scanned
    /// * `nodes` - the node cluster
    /// * `alpha` - penetrance parameter
    /// * `kappa` - maximum insertion parameter
    /// # Errors
    /// * if the support computation hits an internal inconsistency
    pub fn new(graph: &Graph, nodes: NodeSet, alpha: f64, kappa: usize) -> Result<Self, SupportError> {
        let mut subpaths = BTreeSet::new();
        for path in graph.paths().iter() {
            subpaths.extend(compute_support(&nodes, path, alpha, kappa)?);
        }
        Ok(Self::from_subpaths(nodes, subpaths, alpha, kappa))
    }

    /// Builds a region from already known subpaths, e.g. from a prior run's output.
    /// Support and average length are derived here.
    pub fn from_subpaths(nodes: NodeSet, subpaths: impl IntoIterator<Item = Path>, alpha: f64, kappa: usize) -> Self {
        let subpaths: BTreeSet<Path> = subpaths.into_iter().collect();
        let mut region = Self {
            nodes, subpaths, alpha, kappa,
            support: 0,
            rc_support: 0,
            avg_length: 0.0
        };
        region.update_support();
        region.update_avg_length();
        region
    }

    /// Merges two regions into a new one with the union of the nodes.
    /// Subpaths are fully recomputed, since the penetrance test is harder for the larger cluster.
    /// The parameters from `self` are used.
    pub fn merge(&self, other: &FrequentedRegion, graph: &Graph) -> Result<Self, SupportError> {
        Self::new(graph, self.nodes.union(&other.nodes), self.alpha, self.kappa)
    }

    fn update_support(&mut self) {
        self.support = self.subpaths.len() + self.rc_support;
    }

    fn update_avg_length(&mut self) {
        self.avg_length = if self.subpaths.is_empty() {
            0.0
        } else {
            let total: usize = self.subpaths.iter().map(|p| p.sequence_len()).sum();
            total as f64 / self.subpaths.len() as f64
        };
    }

    /// Number of subpaths with each label; unlabeled subpaths are not counted
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for label in self.subpaths.iter().filter_map(|p| p.label()) {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of subpaths on case genomes
    pub fn case_support(&self) -> usize {
        self.subpaths.iter().filter(|p| p.is_case()).count()
    }

    /// Number of subpaths on control genomes
    pub fn control_support(&self) -> usize {
        self.subpaths.iter().filter(|p| p.is_control()).count()
    }

    /// Absolute difference of case and control subpath counts
    pub fn case_control_difference(&self) -> usize {
        self.case_support().abs_diff(self.control_support())
    }

    /// Number of subpaths that came from the given genome
    pub fn path_count(&self, path: &Path) -> usize {
        self.subpaths.iter().filter(|sp| sp.same_genome(path)).count()
    }

    /// Builds the case/control contingency table against the graph.
    /// Genomes are counted once, no matter how many subpaths they contribute.
    pub fn contingency_table(&self, graph: &Graph) -> ContingencyTable {
        let case_in = self.subpaths.iter()
            .filter(|p| p.is_case())
            .map(|p| (p.name(), p.genotype()))
            .unique()
            .count() as u64;
        let ctrl_in = self.subpaths.iter()
            .filter(|p| p.is_control())
            .map(|p| (p.name(), p.genotype()))
            .unique()
            .count() as u64;
        let case_out = (graph.case_paths() as u64).saturating_sub(case_in);
        let ctrl_out = (graph.control_paths() as u64).saturating_sub(ctrl_in);
        ContingencyTable::new(case_in, ctrl_in, case_out, ctrl_out)
    }

    /// Odds ratio of case over control traversal
    pub fn odds_ratio(&self, graph: &Graph) -> f64 {
        self.contingency_table(graph).odds_ratio()
    }

    /// Two-sided Fisher's exact p-value for case/control traversal
    pub fn fisher_p_value(&self, graph: &Graph) -> f64 {
        self.contingency_table(graph).fisher_exact()
    }

    /// Header line matching `summary_line`
    /// # Arguments
    /// * `labels` - the label columns, in output order
    pub fn column_heading(labels: &[&str]) -> Vec<String> {
        let mut heading = vec!["nodes".to_string(), "support".to_string(), "avgLen".to_string()];
        heading.extend(labels.iter().map(|l| l.to_string()));
        heading
    }

    /// Single summary row for this region
    /// # Arguments
    /// * `labels` - the label columns, in output order
    pub fn summary_line(&self, labels: &[&str]) -> Vec<String> {
        let counts = self.label_counts();
        let mut line = vec![
            self.nodes.to_string(),
            self.support.to_string(),
            format!("{:.1}", self.avg_length)
        ];
        line.extend(labels.iter().map(|l| counts.get(*l).copied().unwrap_or(0).to_string()));
        line
    }

    // getters
    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn subpaths(&self) -> &BTreeSet<Path> {
        &self.subpaths
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn kappa(&self) -> usize {
        self.kappa
    }

    pub fn support(&self) -> usize {
        self.support
    }

    pub fn rc_support(&self) -> usize {
        self.rc_support
    }

    pub fn avg_length(&self) -> f64 {
        self.avg_length
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }
}

impl PartialEq for FrequentedRegion {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for FrequentedRegion {}

impl Hash for FrequentedRegion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
    }
}

impl PartialOrd for FrequentedRegion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrequentedRegion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nodes.cmp(&other.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::mock_graphs::{build_graph, case_control_graph, three_node_graph};
    use approx_eq::assert_approx_eq;
    use indexmap::IndexMap;

    #[test]
    fn test_seed_region() {
        let graph = three_node_graph();
        let fr = FrequentedRegion::new(&graph, NodeSet::singleton(2), 1.0, 0).unwrap();
        assert_eq!(fr.support(), 2);
        assert_eq!(fr.rc_support(), 0);
        assert_approx_eq!(fr.avg_length(), 4.0);
        assert_eq!(fr.size(), 1);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let graph = three_node_graph();
        let nodes = NodeSet::new([1, 3]).unwrap();
        let fr1 = FrequentedRegion::new(&graph, nodes.clone(), 1.0, 4).unwrap();
        let fr2 = FrequentedRegion::new(&graph, nodes, 1.0, 4).unwrap();
        assert_eq!(fr1.subpaths(), fr2.subpaths());
        assert_eq!(fr1.support(), fr2.support());
        assert_approx_eq!(fr1.avg_length(), fr2.avg_length());
        assert_eq!(fr1.support(), 2);
        // subpaths carry the interposed node 2
        assert_approx_eq!(fr1.avg_length(), 12.0);
    }

    #[test]
    fn test_merge_closure() {
        let graph = build_graph(
            &[(1, "AAAA"), (2, "CC"), (3, "GGGG"), (4, "TT")],
            &[("a", None, &[1, 2, 3]), ("b", None, &[1, 4, 3]), ("c", None, &[1, 2, 4])]
        );
        let fr_a = FrequentedRegion::new(&graph, NodeSet::new([1, 2]).unwrap(), 1.0, 0).unwrap();
        let fr_b = FrequentedRegion::new(&graph, NodeSet::singleton(3), 1.0, 0).unwrap();
        assert_eq!(fr_a.support(), 2);
        assert_eq!(fr_b.support(), 2);

        let merged = fr_a.merge(&fr_b, &graph).unwrap();
        assert_eq!(merged.nodes(), &fr_a.nodes().union(fr_b.nodes()));
        // only genome "a" walks all three nodes
        assert_eq!(merged.support(), 1);
        assert!(merged.support() <= fr_a.support().min(fr_b.support()));
        assert_approx_eq!(merged.avg_length(), 10.0);
    }

    #[test]
    fn test_identity_by_nodes() {
        let graph = three_node_graph();
        let nodes = NodeSet::new([1, 2]).unwrap();
        let strict = FrequentedRegion::new(&graph, nodes.clone(), 1.0, 0).unwrap();
        let empty = FrequentedRegion::from_subpaths(nodes, vec![], 0.5, 10);
        assert_eq!(strict, empty);
        assert_ne!(strict.support(), empty.support());
        assert_approx_eq!(empty.avg_length(), 0.0);
    }

    #[test]
    fn test_case_control_statistics() {
        let graph = case_control_graph();
        let fr = FrequentedRegion::new(&graph, NodeSet::new([1, 2]).unwrap(), 1.0, 0).unwrap();
        assert_eq!(fr.support(), 10);
        assert_eq!(fr.case_support(), 10);
        assert_eq!(fr.control_support(), 0);
        assert_eq!(fr.case_control_difference(), 10);

        let table = fr.contingency_table(&graph);
        assert_eq!(table, ContingencyTable::new(10, 0, 0, 10));
        let odds = fr.odds_ratio(&graph);
        assert!(odds.is_infinite() && odds > 0.0);
        assert!(fr.fisher_p_value(&graph) < 0.05);

        // node 1 is on every genome, nothing to see here
        let shared = FrequentedRegion::new(&graph, NodeSet::singleton(1), 1.0, 0).unwrap();
        assert_eq!(shared.support(), 20);
        assert_approx_eq!(shared.fisher_p_value(&graph), 1.0);
    }

    #[test]
    fn test_diploid_support() {
        // both haplotypes of "s" walk the region, "t" only has it on haplotype 0
        let mut graph = build_graph(
            &[(1, "AAAA"), (2, "CC"), (3, "GG")],
            &[("s", Some(0), &[1, 2]), ("s", Some(1), &[1, 2]), ("t", Some(0), &[1, 2]), ("t", Some(1), &[1, 3])]
        );
        let labels: IndexMap<String, String> = [("s", "case"), ("t", "ctrl")].into_iter()
            .map(|(n, l)| (n.to_string(), l.to_string()))
            .collect();
        graph.apply_labels(&labels);

        let fr = FrequentedRegion::new(&graph, NodeSet::new([1, 2]).unwrap(), 1.0, 0).unwrap();
        assert_eq!(fr.support(), 3);
        assert_eq!(fr.case_support(), 2);
        assert_eq!(fr.control_support(), 1);
        assert_eq!(fr.path_count(graph.path("s", Some(0)).unwrap()), 1);
        assert_eq!(fr.path_count(graph.path("s", Some(1)).unwrap()), 1);
        assert_eq!(fr.path_count(graph.path("t", Some(1)).unwrap()), 0);
        assert_eq!(fr.contingency_table(&graph), ContingencyTable::new(2, 1, 0, 1));
    }

    #[test]
    fn test_summary_line() {
        let graph = case_control_graph();
        let fr = FrequentedRegion::new(&graph, NodeSet::singleton(3), 1.0, 0).unwrap();
        let labels = graph.labels();
        assert_eq!(
            FrequentedRegion::column_heading(&labels),
            vec!["nodes", "support", "avgLen", "case", "ctrl"]
        );
        assert_eq!(fr.summary_line(&labels), vec!["[3]", "20", "4.0", "10", "10"]);
        assert_eq!(fr.path_count(graph.path("case0", Some(0)).unwrap()), 1);
    }
}
