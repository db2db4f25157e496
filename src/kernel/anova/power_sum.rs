//! Newton-identity evaluation from power sums
//!
//! With p_i = sum_k t_k^i and e_0 = 1,
//!
//! e_j = (1/j) * sum_{i=1..j} (-1)^(i-1) * p_i * e_(j-i)
//!
//! and K_d(t) = e_d. Power sums cost O(n*d) through a running power per
//! coordinate; the identity itself is O(d^2). The alternating sum loses
//! precision as d grows.

/// Reusable buffers: e[0..=d], p[1..=d] and the running powers t_k^i
#[derive(Debug, Clone, Default)]
pub struct PowerSumBuffers {
    elementary: Vec<f64>,
    power_sums: Vec<f64>,
    running: Vec<f64>,
}

impl PowerSumBuffers {
    /// Allocate buffers for degrees up to `max_degree` and vectors up to `max_len`
    pub fn new(max_degree: usize, max_len: usize) -> Self {
        let mut buffers = Self::default();
        buffers.resize(max_degree, max_len);
        buffers
    }

    /// Reallocate for new limits; previous contents are discarded
    pub fn resize(&mut self, max_degree: usize, max_len: usize) {
        self.elementary.clear();
        self.elementary.resize(max_degree + 1, 0.0);
        self.power_sums.clear();
        self.power_sums.resize(max_degree + 1, 0.0);
        self.running.clear();
        self.running.resize(max_len, 0.0);
    }

    fn ensure_capacity(&mut self, degree: usize, len: usize) {
        if degree + 1 > self.elementary.len() || len > self.running.len() {
            let max_degree = degree.max(self.elementary.len().saturating_sub(1));
            self.resize(max_degree, len.max(self.running.len()));
        }
    }

    /// (elementary, power sums, running powers) buffer lengths
    pub fn lens(&self) -> (usize, usize, usize) {
        (
            self.elementary.len(),
            self.power_sums.len(),
            self.running.len(),
        )
    }

    /// e_j from the most recent evaluation
    pub fn elementary(&self, j: usize) -> Option<f64> {
        self.elementary.get(j).copied()
    }

    /// p_i from the most recent evaluation
    pub fn power_sum(&self, i: usize) -> Option<f64> {
        self.power_sums.get(i).copied()
    }

    /// Compute e_degree(t)
    pub fn evaluate(&mut self, t: &[f64], degree: usize) -> f64 {
        let n = t.len();
        self.ensure_capacity(degree, n);

        let running = &mut self.running[..n];
        running.copy_from_slice(t);
        if degree >= 1 {
            self.power_sums[1] = running.iter().sum();
        }
        for i in 2..=degree {
            let mut sum = 0.0;
            for (power, &value) in running.iter_mut().zip(t) {
                *power *= value;
                sum += *power;
            }
            self.power_sums[i] = sum;
        }

        self.elementary[0] = 1.0;
        for j in 1..=degree {
            let mut acc = 0.0;
            let mut sign = 1.0;
            for i in 1..=j {
                acc += sign * self.power_sums[i] * self.elementary[j - i];
                sign = -sign;
            }
            self.elementary[j] = acc / j as f64;
        }

        self.elementary[degree]
    }
}
