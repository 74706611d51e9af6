use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::data_types::frequented_region::FrequentedRegion;
use crate::data_types::graph::Graph;
use crate::data_types::node_set::NodeSet;
use crate::support_solver::SupportError;

/// A candidate merge of two regions.
/// These only exist while ranking the candidates of a single round and are never saved.
#[derive(Clone, Debug)]
pub struct FrPair {
    /// First operand
    fr1: Arc<FrequentedRegion>,
    /// Second operand
    fr2: Arc<FrequentedRegion>,
    /// The result of merging the two operands
    merged: FrequentedRegion,
    /// If true, candidates are ranked by case/control imbalance instead of support
    case_ctrl: bool,
}

/// Ranking key for a candidate merge; a greater key is a better candidate.
/// The order is: primary score (support, or |case - control| in case/control mode), then average subpath length, then number of nodes.
/// Any remaining tie goes to the smaller node set so results are reproducible.
#[derive(Clone, Debug)]
pub struct PairRank {
    /// Merged support, or the case/control difference
    score: usize,
    /// Merged average subpath length
    avg_length: f64,
    /// Merged node count
    size: usize,
    /// Merged node set, only for tie-breaks
    nodes: NodeSet,
    /// Operand node sets in sorted order, only for tie-breaks between different routes to the same merge
    operands: Option<(NodeSet, NodeSet)>,
}

impl PairRank {
    /// Constructor
    pub fn new(score: usize, avg_length: f64, size: usize, nodes: NodeSet) -> Self {
        Self { score, avg_length, size, nodes, operands: None }
    }

    /// Adds the operands as the final tie-break
    pub fn with_operands(mut self, first: NodeSet, second: NodeSet) -> Self {
        self.operands = Some((first, second));
        self
    }

    pub fn score(&self) -> usize {
        self.score
    }
}

impl Ord for PairRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
            .then_with(|| self.avg_length.total_cmp(&other.avg_length))
            .then_with(|| self.size.cmp(&other.size))
            // smaller node sets win the final tie-break
            .then_with(|| other.nodes.cmp(&self.nodes))
            .then_with(|| other.operands.cmp(&self.operands))
    }
}

impl PartialOrd for PairRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PairRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PairRank {}

impl FrPair {
    /// Builds the candidate, which computes the merged region from scratch
    /// # Arguments
    /// * `fr1` - first region
    /// * `fr2` - second region
    /// * `graph` - the graph to compute support against
    /// * `case_ctrl` - enables the case/control ranking mode
    /// # Errors
    /// * if the merged support computation fails
    pub fn new(fr1: Arc<FrequentedRegion>, fr2: Arc<FrequentedRegion>, graph: &Graph, case_ctrl: bool) -> Result<Self, SupportError> {
        let merged = fr1.merge(&fr2, graph)?;
        Ok(Self { fr1, fr2, merged, case_ctrl })
    }

    /// Returns the ranking key for this candidate
    pub fn rank(&self) -> PairRank {
        let score = if self.case_ctrl {
            self.merged.case_control_difference()
        } else {
            self.merged.support()
        };
        let (first, second) = self.ordered_nodes();
        PairRank::new(score, self.merged.avg_length(), self.merged.size(), self.merged.nodes().clone())
            .with_operands(first.clone(), second.clone())
    }

    /// Consumes the pair, returning the merged region
    pub fn into_merged(self) -> FrequentedRegion {
        self.merged
    }

    /// The operand node sets in sorted order, which is how pairs are identified
    fn ordered_nodes(&self) -> (&NodeSet, &NodeSet) {
        let (a, b) = (self.fr1.nodes(), self.fr2.nodes());
        if a <= b { (a, b) } else { (b, a) }
    }

    // getters
    pub fn fr1(&self) -> &Arc<FrequentedRegion> {
        &self.fr1
    }

    pub fn fr2(&self) -> &Arc<FrequentedRegion> {
        &self.fr2
    }

    pub fn merged(&self) -> &FrequentedRegion {
        &self.merged
    }

    pub fn case_ctrl(&self) -> bool {
        self.case_ctrl
    }
}

impl PartialEq for FrPair {
    fn eq(&self, other: &Self) -> bool {
        self.ordered_nodes() == other.ordered_nodes()
    }
}

impl Eq for FrPair {}

impl Hash for FrPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered_nodes().hash(state);
    }
}
