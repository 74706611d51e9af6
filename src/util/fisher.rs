/// A 2x2 contingency table for case/control enrichment.
/// Rows are "traverses the region" / "does not traverse", columns are case / control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContingencyTable {
    /// Case genomes traversing the region
    pub case_in: u64,
    /// Control genomes traversing the region
    pub ctrl_in: u64,
    /// Case genomes not traversing the region
    pub case_out: u64,
    /// Control genomes not traversing the region
    pub ctrl_out: u64,
}

impl ContingencyTable {
    /// Constructor
    pub fn new(case_in: u64, ctrl_in: u64, case_out: u64, ctrl_out: u64) -> Self {
        Self { case_in, ctrl_in, case_out, ctrl_out }
    }

    /// Total number of observations in the table
    pub fn total(&self) -> u64 {
        self.case_in + self.ctrl_in + self.case_out + self.ctrl_out
    }

    /// Odds ratio (case_in * ctrl_out) / (ctrl_in * case_out).
    /// This is +inf when only the denominator is zero, and NaN when both are zero.
    pub fn odds_ratio(&self) -> f64 {
        let num = (self.case_in * self.ctrl_out) as f64;
        let denom = (self.ctrl_in * self.case_out) as f64;
        num / denom
    }

    /// Two-sided Fisher's exact test p-value.
    /// Sums the hypergeometric probability of every table with the same margins that is no more likely than the observed one.
    pub fn fisher_exact(&self) -> f64 {
        let n = self.total() as usize;
        if n == 0 {
            return 1.0;
        }

        let row_in = (self.case_in + self.ctrl_in) as usize;
        let col_case = (self.case_in + self.case_out) as usize;
        let ln_fact = ln_factorials(n);

        // log-probability of seeing `x` case genomes in the traversing row
        let ln_prob = |x: usize| -> f64 {
            ln_choose(&ln_fact, row_in, x)
                + ln_choose(&ln_fact, n - row_in, col_case - x)
                - ln_choose(&ln_fact, n, col_case)
        };

        let observed = ln_prob(self.case_in as usize);
        let min_x = (row_in + col_case).saturating_sub(n);
        let max_x = row_in.min(col_case);

        // relative tolerance so tables with numerically identical probability are counted
        let cutoff = observed + 1e-7;
        let p: f64 = (min_x..=max_x)
            .map(ln_prob)
            .filter(|&lp| lp <= cutoff)
            .map(f64::exp)
            .sum();
        p.min(1.0)
    }
}

/// Returns ln(k!) for all k in 0..=n
fn ln_factorials(n: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(n + 1);
    let mut acc = 0.0;
    values.push(acc);
    for k in 1..=n {
        acc += (k as f64).ln();
        values.push(acc);
    }
    values
}

/// ln(n choose k) from a pre-computed ln-factorial table
fn ln_choose(ln_fact: &[f64], n: usize, k: usize) -> f64 {
    ln_fact[n] - ln_fact[k] - ln_fact[n - k]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_fisher_reference() {
        // classic textbook table: [[1, 9], [11, 3]], two-sided p = 0.002759
        let table = ContingencyTable::new(1, 9, 11, 3);
        assert_approx_eq!(table.fisher_exact(), 0.0027594, 1e-4);
        assert_approx_eq!(table.odds_ratio(), 3.0 / 99.0);
    }

    #[test]
    fn test_fisher_perfect_split() {
        let table = ContingencyTable::new(10, 0, 0, 10);
        // only the two extreme tables qualify: 2 / C(20, 10)
        assert_approx_eq!(table.fisher_exact(), 2.0 / 184756.0, 1e-6);
        assert!(table.odds_ratio().is_infinite());
        assert!(table.odds_ratio() > 0.0);
    }

    #[test]
    fn test_fisher_null() {
        // perfectly balanced table is not significant at all
        let table = ContingencyTable::new(5, 5, 5, 5);
        assert_approx_eq!(table.fisher_exact(), 1.0);
        assert_approx_eq!(table.odds_ratio(), 1.0);

        let empty = ContingencyTable::default();
        assert_approx_eq!(empty.fisher_exact(), 1.0);
        assert!(empty.odds_ratio().is_nan());
    }
}
