/*!
# FR Finder
Contains the round-based search for frequented regions.
The search seeds one region per graph node, then repeatedly merges the best pair of regions until a round adds nothing.
Options for the search are controlled through the `FinderConfig` struct.

## Example usage
```rust
use frfinder::data_types::graph::Graph;
use frfinder::data_types::node::Node;
use frfinder::data_types::path::Path;
use frfinder::fr_finder::{FinderConfigBuilder, FrFinder, SearchStrategy};
use std::collections::BTreeMap;
use std::sync::Arc;

// two genomes that both walk 1 -> 2 -> 3
let nodes: BTreeMap<i64, Arc<Node>> = [(1, "ACGT"), (2, "CCCC"), (3, "GGTT")].into_iter()
    .map(|(id, seq)| (id, Arc::new(Node::new(id, seq.to_string()))))
    .collect();
let walk: Vec<Arc<Node>> = nodes.values().cloned().collect();
let paths = vec![
    Path::new("g1".to_string(), None, None, walk.clone()),
    Path::new("g2".to_string(), None, None, walk),
];
let graph = Graph::new(nodes, paths, None).unwrap();

let config = FinderConfigBuilder::default()
    .alpha(1.0)
    .kappa(0)
    .strategy(SearchStrategy::Serial)
    .build().unwrap();
let mut finder = FrFinder::seed(&graph, config).unwrap();
finder.find_regions();

// first {1,2} is accepted, then {1,2,3}
let found: Vec<String> = finder.accepted().map(|fr| fr.nodes().to_string()).collect();
assert_eq!(found, vec!["[1,2]", "[1,2,3]"]);
```
*/
use derive_builder::Builder;
use indicatif::ParallelProgressIterator;
use log::{debug, error, info, trace};
use priority_queue::PriorityQueue;
use rayon::prelude::*;
use rustc_hash::FxHashSet as HashSet;
use std::collections::BTreeMap;
use std::sync::{mpsc, Arc};
use std::time::Instant;
use strum_macros::{EnumIter, EnumString};

use crate::data_types::fr_pair::{FrPair, PairRank};
use crate::data_types::frequented_region::FrequentedRegion;
use crate::data_types::graph::Graph;
use crate::data_types::node_set::NodeSet;
use crate::util::progress_bar::get_progress_style;

/// How candidate pairs are enumerated and accepted each round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum_macros::Display, EnumIter, EnumString)]
pub enum SearchStrategy {
    /// Accepts every new merge each round; exhaustive and only intended for testing
    #[strum(ascii_case_insensitive, serialize = "bruteforce")]
    BruteForce,
    /// Single-threaded enumeration, one merge accepted per round
    #[strum(ascii_case_insensitive, serialize = "serial")]
    Serial,
    /// Multi-threaded enumeration, one merge accepted per round
    #[default]
    #[strum(ascii_case_insensitive, serialize = "parallel")]
    Parallel,
}

/// Immutable settings for a single search
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct FinderConfig {
    /// Penetrance, minimum fraction of region nodes a supporting subpath must cover
    alpha: f64,
    /// Maximum number of inserted bases between consecutive region nodes on a subpath
    kappa: usize,
    /// If true, candidates are ranked by case/control imbalance
    case_ctrl: bool,
    /// Enumeration strategy
    strategy: SearchStrategy,
    /// If set, the search stops after this many rounds even if it has not converged
    max_rounds: Option<usize>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        // reasonable defaults for unit tests, main.rs sets everything from user input
        Self {
            alpha: 1.0,
            kappa: 0,
            case_ctrl: false,
            strategy: SearchStrategy::Parallel,
            max_rounds: None
        }
    }
}

impl FinderConfig {
    // mostly getters
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn kappa(&self) -> usize {
        self.kappa
    }

    pub fn case_ctrl(&self) -> bool {
        self.case_ctrl
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn max_rounds(&self) -> Option<usize> {
        self.max_rounds
    }
}

/// Thresholds used to filter accepted regions after a search
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegionFilter {
    /// Minimum support
    pub min_support: usize,
    /// Minimum number of nodes
    pub min_size: usize,
    /// Minimum average subpath length
    pub min_length: f64,
}

impl RegionFilter {
    /// Returns true if the region passes every threshold
    pub fn passes(&self, region: &FrequentedRegion) -> bool {
        region.support() >= self.min_support &&
            region.size() >= self.min_size &&
            region.avg_length() >= self.min_length
    }
}

/// The phases a finder moves through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// Seed regions are built, no rounds have run
    Seeded,
    /// At least one round has run and the search has not converged
    Growing { round: usize },
    /// A round added nothing
    Converged,
    /// Accepted regions were filtered by `postprocess`
    Filtered,
}

/// Drives the search and holds its results
pub struct FrFinder<'a> {
    /// Shared graph, read-only
    graph: &'a Graph,
    /// Search settings
    config: FinderConfig,
    /// The working set: every seed plus every accepted region
    working: BTreeMap<NodeSet, Arc<FrequentedRegion>>,
    /// Regions that were already consumed by a merge
    used: HashSet<NodeSet>,
    /// The accepted output regions
    accepted: BTreeMap<NodeSet, Arc<FrequentedRegion>>,
    /// Current phase
    state: SearchState,
    /// Number of completed rounds
    rounds: usize,
    /// Number of seed regions with non-zero support
    num_seeds: usize,
}

impl<'a> FrFinder<'a> {
    /// Builds the finder and its seed regions, one per graph node with non-zero support.
    /// # Arguments
    /// * `graph` - the graph to search
    /// * `config` - the search settings
    /// # Errors
    /// * if the configuration has an invalid alpha
    pub fn seed(graph: &'a Graph, config: FinderConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(config.alpha >= 0.0 && config.alpha <= 1.0, "alpha must be in [0, 1], found {}", config.alpha);

        let node_ids: Vec<i64> = graph.nodes().keys().copied().collect();
        info!("Seeding regions from {} nodes...", node_ids.len());
        let build_seed = |id: i64| -> Option<FrequentedRegion> {
            match FrequentedRegion::new(graph, NodeSet::singleton(id), config.alpha, config.kappa) {
                Ok(fr) => Some(fr),
                Err(e) => {
                    error!("Error while seeding node {id}, skipping: {e}");
                    None
                }
            }
        };

        let seeds: Vec<FrequentedRegion> = if config.strategy == SearchStrategy::Parallel {
            let style = get_progress_style();
            node_ids.into_par_iter()
                .progress_with_style(style)
                .filter_map(build_seed)
                .collect()
        } else {
            node_ids.into_iter()
                .filter_map(build_seed)
                .collect()
        };

        let working: BTreeMap<NodeSet, Arc<FrequentedRegion>> = seeds.into_iter()
            .filter(|fr| fr.support() > 0)
            .map(|fr| (fr.nodes().clone(), Arc::new(fr)))
            .collect();
        let num_seeds = working.len();
        info!("Seeded {num_seeds} regions with non-zero support.");

        Ok(Self {
            graph, config, working,
            used: Default::default(),
            accepted: Default::default(),
            state: SearchState::Seeded,
            rounds: 0,
            num_seeds
        })
    }

    /// Rebuilds a finder from regions loaded from a prior run.
    /// No search is performed, the loaded regions are treated as the converged result.
    /// # Arguments
    /// * `graph` - the graph the regions were resolved against
    /// * `config` - the settings from the prior run
    /// * `regions` - the previously accepted regions
    pub fn from_accepted(graph: &'a Graph, config: FinderConfig, regions: Vec<FrequentedRegion>) -> Self {
        let accepted: BTreeMap<NodeSet, Arc<FrequentedRegion>> = regions.into_iter()
            .map(|fr| (fr.nodes().clone(), Arc::new(fr)))
            .collect();
        Self {
            graph, config,
            working: accepted.clone(),
            used: Default::default(),
            accepted,
            state: SearchState::Converged,
            rounds: 0,
            num_seeds: 0
        }
    }

    /// Runs rounds until one adds nothing, or until the optional round cap is hit.
    /// Returns the number of rounds performed.
    pub fn find_regions(&mut self) -> usize {
        let start_time = Instant::now();
        info!("Starting {} search with alpha={}, kappa={}...", self.config.strategy, self.config.alpha, self.config.kappa);
        loop {
            if let Some(max_rounds) = self.config.max_rounds {
                if self.rounds >= max_rounds {
                    info!("Stopping after {max_rounds} rounds without convergence.");
                    break;
                }
            }

            let round = self.rounds + 1;
            let added = match self.config.strategy {
                SearchStrategy::BruteForce => self.brute_force_round(),
                SearchStrategy::Serial => {
                    let pqueue = self.enumerate_serial();
                    self.accept_best(pqueue)
                },
                SearchStrategy::Parallel => {
                    let pqueue = self.enumerate_parallel();
                    self.accept_best(pqueue)
                }
            };

            if added == 0 {
                debug!("Round {round} added nothing.");
                self.state = SearchState::Converged;
                break;
            }
            self.rounds = round;
            self.state = SearchState::Growing { round };
        }

        info!(
            "Search finished after {} rounds with {} accepted regions in {} seconds.",
            self.rounds, self.accepted.len(), start_time.elapsed().as_secs_f64()
        );
        self.rounds
    }

    /// The working set regions that can still take part in a merge
    fn available_regions(&self) -> Vec<Arc<FrequentedRegion>> {
        self.working.values()
            .filter(|fr| !self.used.contains(fr.nodes()))
            .cloned()
            .collect()
    }

    /// Evaluates a single candidate merge, returning it only if it is worth ranking.
    /// Merges already in the accepted set and merges without support are dropped.
    /// Support computation failures are logged and the candidate is skipped.
    fn evaluate_pair(&self, fr1: &Arc<FrequentedRegion>, fr2: &Arc<FrequentedRegion>) -> Option<FrPair> {
        let union = fr1.nodes().union(fr2.nodes());
        if self.accepted.contains_key(&union) {
            return None;
        }

        match FrPair::new(fr1.clone(), fr2.clone(), self.graph, self.config.case_ctrl) {
            Ok(pair) => {
                if pair.merged().support() > 0 {
                    Some(pair)
                } else {
                    None
                }
            },
            Err(e) => {
                error!("Error while merging {} and {}, skipping candidate: {e}", fr1.nodes(), fr2.nodes());
                None
            }
        }
    }

    /// Best candidate pairing `regions[i]` with every smaller region.
    /// Only one round winner is ever accepted, so losing candidates (and their subpath sets) are dropped right away.
    fn best_in_row(&self, regions: &[Arc<FrequentedRegion>], i: usize) -> Option<(FrPair, PairRank)> {
        let mut best: Option<(FrPair, PairRank)> = None;
        for j in 0..i {
            if let Some(pair) = self.evaluate_pair(&regions[i], &regions[j]) {
                let rank = pair.rank();
                let improves = match best.as_ref() {
                    Some((_, best_rank)) => rank > *best_rank,
                    None => true
                };
                if improves {
                    best = Some((pair, rank));
                }
            }
        }
        best
    }

    /// Single-threaded pair enumeration into a priority queue, holding at most one candidate per region
    fn enumerate_serial(&self) -> PriorityQueue<FrPair, PairRank> {
        let regions = self.available_regions();
        let mut pqueue: PriorityQueue<FrPair, PairRank> = PriorityQueue::new();
        // regions are sorted, so i > j means regions[i] > regions[j]
        for i in 0..regions.len() {
            if let Some((pair, rank)) = self.best_in_row(&regions, i) {
                pqueue.push(pair, rank);
            }
        }
        pqueue
    }

    /// Parallel pair enumeration.
    /// Workers only read the snapshot of the working set and send their best candidate per region back over a channel.
    /// Once every worker is done, the candidates are drained into a priority queue on this thread.
    /// At most one candidate per available region is alive at once.
    fn enumerate_parallel(&self) -> PriorityQueue<FrPair, PairRank> {
        let regions = self.available_regions();
        let (tx, rx) = mpsc::channel();
        (0..regions.len()).into_par_iter()
            .for_each_with(tx, |tx, i| {
                if let Some(candidate) = self.best_in_row(&regions, i) {
                    if let Err(e) = tx.send(candidate) {
                        error!("Error while sending candidate: {e}");
                    }
                }
            });

        // all senders are dropped at this point, so the drain terminates
        let mut pqueue: PriorityQueue<FrPair, PairRank> = PriorityQueue::new();
        for (pair, rank) in rx {
            pqueue.push(pair, rank);
        }
        pqueue
    }

    /// Accepts the best candidate, if any. Returns the number of regions added (0 or 1).
    fn accept_best(&mut self, mut pqueue: PriorityQueue<FrPair, PairRank>) -> usize {
        debug!("Round {} ranked {} candidates", self.rounds + 1, pqueue.len());
        let Some((best, rank)) = pqueue.pop() else {
            return 0;
        };
        if best.merged().support() == 0 {
            return 0;
        }

        self.used.insert(best.fr1().nodes().clone());
        self.used.insert(best.fr2().nodes().clone());
        let merged = Arc::new(best.into_merged());
        info!(
            "Round {}: accepted {} (support={}, avgLen={:.1}, score={})",
            self.rounds + 1, merged.nodes(), merged.support(), merged.avg_length(), rank.score()
        );
        self.working.insert(merged.nodes().clone(), merged.clone());
        self.accepted.insert(merged.nodes().clone(), merged);
        1
    }

    /// Exhaustive round: every pair of working regions is merged and every new region with support is accepted.
    /// Returns the number of regions added.
    fn brute_force_round(&mut self) -> usize {
        let regions: Vec<Arc<FrequentedRegion>> = self.working.values().cloned().collect();
        let mut new_regions: BTreeMap<NodeSet, FrequentedRegion> = BTreeMap::new();
        for i in 0..regions.len() {
            for j in 0..i {
                let union = regions[i].nodes().union(regions[j].nodes());
                if self.working.contains_key(&union) || new_regions.contains_key(&union) {
                    continue;
                }
                if let Some(pair) = self.evaluate_pair(&regions[i], &regions[j]) {
                    let merged = pair.into_merged();
                    trace!("Brute force accepted {}", merged.nodes());
                    new_regions.insert(merged.nodes().clone(), merged);
                }
            }
        }

        let added = new_regions.len();
        for (nodes, fr) in new_regions.into_iter() {
            let fr = Arc::new(fr);
            self.working.insert(nodes.clone(), fr.clone());
            self.accepted.insert(nodes, fr);
        }
        info!("Round {}: brute force accepted {added} regions", self.rounds + 1);
        added
    }

    /// Drops every accepted region that fails the filter. This never re-runs the search.
    /// Returns the number of regions removed.
    pub fn postprocess(&mut self, filter: &RegionFilter) -> usize {
        let before = self.accepted.len();
        self.accepted.retain(|_nodes, fr| filter.passes(fr));
        let removed = before - self.accepted.len();
        info!(
            "Post-processing with min_support={}, min_size={}, min_length={} removed {removed} of {before} regions.",
            filter.min_support, filter.min_size, filter.min_length
        );
        self.state = SearchState::Filtered;
        removed
    }

    /// Logs case/control statistics for every accepted region, only if the graph has both labels
    pub fn log_case_control_statistics(&self) {
        if self.graph.case_paths() == 0 || self.graph.control_paths() == 0 {
            return;
        }
        for fr in self.accepted.values() {
            debug!(
                "{}: case={}, ctrl={}, OR={:.3}, p={:.3e}",
                fr.nodes(), fr.case_support(), fr.control_support(),
                fr.odds_ratio(self.graph), fr.fisher_p_value(self.graph)
            );
        }
    }

    /// Accepted regions in node set order
    pub fn accepted(&self) -> impl Iterator<Item = &FrequentedRegion> {
        self.accepted.values().map(|fr| fr.as_ref())
    }

    // getters
    pub fn graph(&self) -> &Graph {
        self.graph
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn num_accepted(&self) -> usize {
        self.accepted.len()
    }

    pub fn num_seeds(&self) -> usize {
        self.num_seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::mock_graphs::{build_graph, case_control_graph, three_node_graph};
    use strum::IntoEnumIterator;

    fn config(strategy: SearchStrategy, alpha: f64, kappa: usize) -> FinderConfig {
        FinderConfigBuilder::default()
            .alpha(alpha)
            .kappa(kappa)
            .strategy(strategy)
            .build().unwrap()
    }

    fn accepted_strings(finder: &FrFinder) -> Vec<String> {
        finder.accepted().map(|fr| fr.nodes().to_string()).collect()
    }

    #[test]
    fn test_seeding() {
        let graph = build_graph(
            &[(1, "AAAA"), (2, "CC"), (3, "GGGG"), (4, "TTT")],
            &[("a", None, &[1, 2, 3]), ("b", None, &[1, 3])]
        );
        // node 4 is on no path, so it never becomes a seed
        let finder = FrFinder::seed(&graph, config(SearchStrategy::Serial, 1.0, 0)).unwrap();
        assert_eq!(finder.num_seeds(), 3);
        assert_eq!(finder.num_accepted(), 0);
        assert_eq!(finder.state(), SearchState::Seeded);

        assert!(FrFinder::seed(&graph, config(SearchStrategy::Serial, 1.5, 0)).is_err());
    }

    #[test]
    fn test_serial_search() {
        let graph = three_node_graph();
        let mut finder = FrFinder::seed(&graph, config(SearchStrategy::Serial, 1.0, 0)).unwrap();
        let rounds = finder.find_regions();
        assert_eq!(rounds, 2);
        assert_eq!(finder.state(), SearchState::Converged);
        assert_eq!(accepted_strings(&finder), vec!["[1,2]", "[1,2,3]"]);
        for fr in finder.accepted() {
            assert_eq!(fr.support(), 2);
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let graph = build_graph(
            &[(1, "AAAA"), (2, "CC"), (3, "GGGG"), (4, "TT"), (5, "ACGTACGT"), (6, "G")],
            &[
                ("a", None, &[1, 2, 3, 5, 6]),
                ("b", None, &[1, 4, 3, 5, 6]),
                ("c", None, &[1, 2, 3, 5]),
                ("d", None, &[1, 4, 3, 6]),
            ]
        );
        let mut serial = FrFinder::seed(&graph, config(SearchStrategy::Serial, 0.5, 2)).unwrap();
        serial.find_regions();
        let mut parallel = FrFinder::seed(&graph, config(SearchStrategy::Parallel, 0.5, 2)).unwrap();
        parallel.find_regions();

        assert!(serial.num_accepted() > 0);
        assert_eq!(serial.rounds(), parallel.rounds());
        assert_eq!(accepted_strings(&serial), accepted_strings(&parallel));
    }

    #[test]
    fn test_max_rounds() {
        let graph = three_node_graph();
        let cfg = FinderConfigBuilder::default()
            .strategy(SearchStrategy::Parallel)
            .max_rounds(Some(1))
            .build().unwrap();
        let mut finder = FrFinder::seed(&graph, cfg).unwrap();
        assert_eq!(finder.find_regions(), 1);
        assert_eq!(finder.state(), SearchState::Growing { round: 1 });
        assert_eq!(accepted_strings(&finder), vec!["[1,2]"]);
    }

    #[test]
    fn test_brute_force() {
        let graph = three_node_graph();
        let mut finder = FrFinder::seed(&graph, config(SearchStrategy::BruteForce, 1.0, 0)).unwrap();
        finder.find_regions();
        // {1,3} has no support with kappa = 0; everything else is reachable
        assert_eq!(accepted_strings(&finder), vec!["[1,2]", "[1,2,3]", "[2,3]"]);
        assert_eq!(finder.state(), SearchState::Converged);
    }

    #[test]
    fn test_termination_without_support() {
        // two genomes with disjoint nodes can never merge with alpha = 1
        let graph = build_graph(&[(1, "A"), (2, "C")], &[("a", None, &[1]), ("b", None, &[2])]);
        for strategy in SearchStrategy::iter() {
            let mut finder = FrFinder::seed(&graph, config(strategy, 1.0, 0)).unwrap();
            assert_eq!(finder.find_regions(), 0);
            assert_eq!(finder.num_accepted(), 0);
            assert_eq!(finder.state(), SearchState::Converged);
        }
    }

    #[test]
    fn test_case_control_search() {
        let graph = case_control_graph();
        let cfg = FinderConfigBuilder::default()
            .case_ctrl(true)
            .strategy(SearchStrategy::Serial)
            .max_rounds(Some(1))
            .build().unwrap();
        let mut finder = FrFinder::seed(&graph, cfg).unwrap();
        finder.find_regions();
        // every first merge is fully imbalanced, so the longest one wins
        let best = finder.accepted().next().unwrap();
        assert_eq!(best.nodes().to_string(), "[1,3]");
        assert_eq!(best.control_support(), 10);
        assert_eq!(best.case_support(), 0);
        assert_eq!(best.case_control_difference(), 10);
        finder.log_case_control_statistics();
    }

    #[test]
    fn test_postprocess() {
        let graph = build_graph(
            &[(1, "AAAA"), (2, "CC"), (3, "GGGG")],
            &[("a", None, &[1, 2, 3]), ("b", None, &[1, 2, 3]), ("c", None, &[1, 2])]
        );
        let mut finder = FrFinder::seed(&graph, config(SearchStrategy::Serial, 1.0, 0)).unwrap();
        finder.find_regions();
        assert_eq!(accepted_strings(&finder), vec!["[1,2]", "[1,2,3]"]);

        let filter = RegionFilter { min_support: 3, min_size: 0, min_length: 0.0 };
        assert_eq!(finder.postprocess(&filter), 1);
        assert_eq!(accepted_strings(&finder), vec!["[1,2]"]);
        assert_eq!(finder.state(), SearchState::Filtered);

        let filter = RegionFilter { min_support: 0, min_size: 0, min_length: 7.0 };
        assert_eq!(finder.postprocess(&filter), 1);
        assert_eq!(finder.num_accepted(), 0);
        // filtering never changes the seed count
        assert_eq!(finder.num_seeds(), 3);
    }

    #[test]
    fn test_enumeration_keeps_best() {
        let graph = build_graph(
            &[(1, "AAAA"), (2, "CC"), (3, "GGGG"), (4, "TT"), (5, "ACGTACGT")],
            &[("a", None, &[1, 2, 3, 5]), ("b", None, &[1, 4, 3, 5]), ("c", None, &[2, 3, 4])]
        );
        let finder = FrFinder::seed(&graph, config(SearchStrategy::Serial, 0.5, 2)).unwrap();
        let regions = finder.available_regions();

        let mut all_ranks = vec![];
        for i in 0..regions.len() {
            for j in 0..i {
                if let Some(pair) = finder.evaluate_pair(&regions[i], &regions[j]) {
                    all_ranks.push(pair.rank());
                }
            }
        }
        let best_rank = all_ranks.iter().max().unwrap().clone();

        let serial = finder.enumerate_serial();
        let parallel = finder.enumerate_parallel();
        assert!(serial.len() <= regions.len());
        assert!(parallel.len() <= regions.len());
        assert!(serial.len() < all_ranks.len());
        assert_eq!(serial.peek().unwrap().1, &best_rank);
        assert_eq!(parallel.peek().unwrap().1, &best_rank);
    }

    #[test]
    fn test_subpaths_round_trip() {
        use crate::parsing::subpaths::load_subpaths;
        use crate::util::atomic_file::write_atomic;
        use crate::writers::subpaths::write_subpaths;

        let graph = three_node_graph();
        let cfg = FinderConfigBuilder::default()
            .strategy(SearchStrategy::Serial)
            .max_rounds(Some(1))
            .build().unwrap();
        let mut finder = FrFinder::seed(&graph, cfg).unwrap();
        finder.find_regions();
        let regions: Vec<&FrequentedRegion> = finder.accepted().collect();
        assert_eq!(regions.len(), 1);

        let dir = tempfile::tempdir().unwrap();
        let filename = dir.path().join("run.subpaths.txt");
        write_atomic(&filename, |w| write_subpaths(w, &regions)).unwrap();

        let reloaded = load_subpaths(&filename, &graph, 1.0, 0).unwrap();
        let resumed = FrFinder::from_accepted(&graph, cfg, reloaded);
        assert_eq!(resumed.state(), SearchState::Converged);
        assert_eq!(resumed.num_seeds(), 0);
        assert_eq!(finder.num_seeds(), 3);
        let resumed_regions: Vec<&FrequentedRegion> = resumed.accepted().collect();
        assert_eq!(resumed_regions.len(), 1);
        assert_eq!(resumed_regions[0].nodes().to_string(), "[1,2]");
        assert_eq!(resumed_regions[0].support(), 2);
        assert_eq!(resumed_regions[0].subpaths(), regions[0].subpaths());
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Serial".parse::<SearchStrategy>().unwrap(), SearchStrategy::Serial);
        assert_eq!("bruteforce".parse::<SearchStrategy>().unwrap(), SearchStrategy::BruteForce);
        assert_eq!(SearchStrategy::Parallel.to_string(), "parallel");
        assert!("fast".parse::<SearchStrategy>().is_err());
    }
}
