//! Subset-sum dynamic programming table
//!
//! A(k, j) is the sum, over all strictly increasing index tuples of size j
//! drawn from the first k coordinates of t, of the product of the selected
//! values. Coordinate k is either left out, or taken as the largest selected
//! index:
//!
//! A(k, j) = A(k-1, j) + t_k * A(k-1, j-1)
//!
//! with A(k, 0) = 1 and A(0, j) = 0 for j >= 1. K_d(t) = A(n, d).
//! Accumulation is purely additive, so there is no cancellation error.

/// Reusable (d+1) x (n+1) table, stored one degree row at a time
#[derive(Debug, Clone, Default)]
pub struct SubsetSumTable {
    cells: Vec<f64>,
    max_degree: usize,
    max_len: usize,
}

impl SubsetSumTable {
    /// Allocate a table for degrees up to `max_degree` and vectors up to `max_len`
    pub fn new(max_degree: usize, max_len: usize) -> Self {
        let mut table = Self::default();
        table.resize(max_degree, max_len);
        table
    }

    /// Reallocate for new limits; previous contents are discarded
    pub fn resize(&mut self, max_degree: usize, max_len: usize) {
        self.max_degree = max_degree;
        self.max_len = max_len;
        self.cells.clear();
        self.cells.resize((max_degree + 1) * (max_len + 1), 0.0);
    }

    /// Grow if a call needs more room than the current limits
    fn ensure_capacity(&mut self, degree: usize, len: usize) {
        let needed = (degree.max(self.max_degree) + 1) * (len.max(self.max_len) + 1);
        if degree > self.max_degree || len > self.max_len || self.cells.len() < needed {
            self.resize(degree.max(self.max_degree), len.max(self.max_len));
        }
    }

    /// (degree rows, prefix columns)
    pub fn dims(&self) -> (usize, usize) {
        (self.max_degree + 1, self.max_len + 1)
    }

    #[inline]
    fn cols(&self) -> usize {
        self.max_len + 1
    }

    /// A(k, j) from the most recent evaluation, or `None` outside the table
    pub fn get(&self, k: usize, j: usize) -> Option<f64> {
        if k > self.max_len || j > self.max_degree {
            return None;
        }
        self.cells.get(j * self.cols() + k).copied()
    }

    /// Fill the table for `t` and return A(n, degree)
    pub fn evaluate(&mut self, t: &[f64], degree: usize) -> f64 {
        let n = t.len();
        self.ensure_capacity(degree, n);
        let cols = self.cols();

        // Degree 0 is reachable from every prefix (empty product)
        self.cells[..=n].fill(1.0);

        for j in 1..=degree {
            let (lower, upper) = self.cells.split_at_mut(j * cols);
            let prev = &lower[(j - 1) * cols..];
            let row = &mut upper[..cols];

            // Positive degree is unreachable from the empty prefix
            row[0] = 0.0;
            for k in 1..=n {
                row[k] = row[k - 1] + t[k - 1] * prev[k - 1];
            }
        }

        self.cells[degree * cols + n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scenario_degree_two() {
        let mut table = SubsetSumTable::new(2, 3);
        // 1*2 + 1*3 + 2*3
        assert_eq!(table.evaluate(&[1.0, 2.0, 3.0], 2), 11.0);
    }

    #[test]
    fn test_base_cases_hold_after_evaluation() {
        let mut table = SubsetSumTable::new(3, 4);
        table.evaluate(&[0.5, -1.0, 2.0, 4.0], 3);

        for k in 0..=4 {
            assert_eq!(table.get(k, 0), Some(1.0));
        }
        for j in 1..=3 {
            assert_eq!(table.get(0, j), Some(0.0));
        }
    }

    #[test]
    fn test_intermediate_cells() {
        let t = [2.0, 3.0, 5.0];
        let mut table = SubsetSumTable::new(3, 3);
        let result = table.evaluate(&t, 3);

        // Prefix sums of degree 1
        assert_eq!(table.get(1, 1), Some(2.0));
        assert_eq!(table.get(2, 1), Some(5.0));
        assert_eq!(table.get(3, 1), Some(10.0));
        // e_2 over the first two coordinates
        assert_eq!(table.get(2, 2), Some(6.0));
        // Degree exceeds prefix length
        assert_eq!(table.get(2, 3), Some(0.0));
        assert_eq!(result, 30.0);
    }

    #[test]
    fn test_degree_zero_and_empty_input() {
        let mut table = SubsetSumTable::default();
        assert_eq!(table.evaluate(&[], 0), 1.0);
        assert_eq!(table.evaluate(&[4.0, 5.0], 0), 1.0);
        assert_eq!(table.evaluate(&[], 2), 0.0);
    }

    #[test]
    fn test_default_table_allocates_on_first_use() {
        let mut table = SubsetSumTable::default();
        assert_eq!(table.get(0, 0), None);

        assert_eq!(table.evaluate(&[], 0), 1.0);
        assert_eq!(table.dims(), (1, 1));
        assert_eq!(table.get(0, 0), Some(1.0));
    }

    #[test]
    fn test_get_outside_table() {
        let mut table = SubsetSumTable::new(2, 3);
        table.evaluate(&[1.0, 2.0, 3.0], 2);
        assert_eq!(table.get(4, 0), None);
        assert_eq!(table.get(0, 3), None);
        assert_eq!(table.get(3, 2), Some(11.0));
    }

    #[test]
    fn test_grows_on_demand() {
        let mut table = SubsetSumTable::new(1, 2);
        assert_eq!(table.dims(), (2, 3));

        let result = table.evaluate(&[1.0, 1.0, 1.0, 1.0, 1.0], 3);
        // C(5, 3)
        assert_relative_eq!(result, 10.0);
        assert_eq!(table.dims(), (4, 6));
    }

    #[test]
    fn test_reuse_overwrites_previous_contents() {
        let mut table = SubsetSumTable::new(2, 4);
        table.evaluate(&[9.0, 9.0, 9.0, 9.0], 2);
        assert_eq!(table.evaluate(&[1.0, 2.0], 2), 2.0);
    }
}
