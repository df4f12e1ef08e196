//! Compressed-row sparse graph store.
//!
//! Mirrors the `CSR` type of the reference implementation: adjacency plus
//! per-vertex degree, a current labeling, and scratch vectors reused across
//! BFS calls so labelers never pay for reallocation.

use std::time::Duration;

/// A symmetric, loop-free sparse graph in compressed-row form, plus the
/// current labeling and scratch space shared by every labeler that runs on
/// it.
#[derive(Clone, Debug)]
pub struct Graph {
    /// `row_ptr[0..n]`; `row_ptr[i]..row_ptr[i + 1]` indexes `col_idx` for
    /// the neighbors of `i`.
    pub row_ptr: Vec<usize>,
    /// Column indices of the adjacency, sorted ascending within each row.
    pub col_idx: Vec<usize>,
    /// `deg[i] = row_ptr[i + 1] - row_ptr[i]`.
    pub deg: Vec<usize>,
    pub min_deg: usize,
    pub max_deg: usize,
    /// Current permutation of the vertices.
    pub labels: Vec<usize>,
    /// Objective value of `labels` as of the last `evaluate_profile` call.
    pub profile: usize,
    /// Monotone minimum profile seen so far. `None` means unbounded (no
    /// solution evaluated yet).
    pub best_profile: Option<usize>,
    /// BFS scratch: distance from the last BFS root.
    pub distances: Vec<usize>,
    /// BFS scratch: visited flags, reused across calls.
    pub visited: Vec<bool>,
    /// Wall-clock deadline for the BRKGA driver.
    pub max_time: Duration,
}

impl Graph {
    pub fn n(&self) -> usize {
        self.row_ptr.len().saturating_sub(1)
    }

    /// Builds a graph from an already-symmetrized, loop-free, sorted CSR
    /// adjacency. `row_ptr.len()` must be `n + 1`.
    pub fn from_csr(row_ptr: Vec<usize>, col_idx: Vec<usize>) -> Self {
        let n = row_ptr.len() - 1;
        let mut deg = Vec::with_capacity(n);
        let mut min_deg = usize::MAX;
        let mut max_deg = 0;
        for i in 0..n {
            let d = row_ptr[i + 1] - row_ptr[i];
            deg.push(d);
            min_deg = min_deg.min(d);
            max_deg = max_deg.max(d);
        }
        if n == 0 {
            min_deg = 0;
        }
        Graph {
            row_ptr,
            col_idx,
            deg,
            min_deg,
            max_deg,
            labels: (0..n).collect(),
            profile: 0,
            best_profile: None,
            distances: vec![0; n],
            visited: vec![false; n],
            max_time: Duration::from_secs(10),
        }
    }

    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.col_idx[self.row_ptr[v]..self.row_ptr[v + 1]]
    }

    /// §4.1: profile of the current labeling. Updates `best_profile`.
    pub fn evaluate_profile(&mut self) -> usize {
        let n = self.n();
        let mut profile = 0usize;
        for i in 0..n {
            let li = self.labels[i];
            if li == 0 {
                continue;
            }
            let mut m = li;
            for &j in self.neighbors(i) {
                let lj = self.labels[j];
                if lj < m {
                    m = lj;
                }
                if m == 0 {
                    break;
                }
            }
            profile += li - m;
        }
        self.profile = profile;
        self.best_profile = Some(match self.best_profile {
            Some(b) => b.min(profile),
            None => profile,
        });
        profile
    }

    /// Plain BFS from `v`; fills `distances` (distance 0 at `v`, reused
    /// scratch for unreached vertices when the graph is disconnected: those
    /// retain their previous value, so callers only rely on `distances` for
    /// reached vertices, matching the reference, which assumes connectivity).
    pub fn bfs(&mut self, v: usize) {
        let n = self.n();
        self.visited.clear();
        self.visited.resize(n, false);
        self.distances.clear();
        self.distances.resize(n, 0);
        self.visited[v] = true;
        let mut queue = std::collections::VecDeque::with_capacity(n);
        queue.push_back(v);
        let mut dist = 0usize;
        while !queue.is_empty() {
            let level_size = queue.len();
            dist += 1;
            for _ in 0..level_size {
                let u = queue.pop_front().unwrap();
                for &w in self.neighbors(u) {
                    if !self.visited[w] {
                        self.visited[w] = true;
                        self.distances[w] = dist;
                        queue.push_back(w);
                    }
                }
            }
        }
    }

    /// Vertices at the maximum BFS distance from `v`, and that distance
    /// (the eccentricity of `v`).
    pub fn last_level_and_eccentricity(&mut self, v: usize) -> (Vec<usize>, usize) {
        let n = self.n();
        self.visited.clear();
        self.visited.resize(n, false);
        self.visited[v] = true;
        let mut queue = std::collections::VecDeque::with_capacity(n);
        queue.push_back(v);
        let mut last_level = Vec::new();
        let mut eccentricity = 0usize;
        while !queue.is_empty() {
            let level_size = queue.len();
            last_level.clear();
            eccentricity += 1;
            for _ in 0..level_size {
                let u = queue.pop_front().unwrap();
                last_level.push(u);
                for &w in self.neighbors(u) {
                    if !self.visited[w] {
                        self.visited[w] = true;
                        queue.push_back(w);
                    }
                }
            }
        }
        eccentricity -= 1;
        (last_level, eccentricity)
    }

    /// Eccentricity and maximum level width of the rooted level structure
    /// from `v`.
    pub fn eccentricity_and_width(&mut self, v: usize) -> (usize, usize) {
        let n = self.n();
        self.visited.clear();
        self.visited.resize(n, false);
        self.visited[v] = true;
        let mut queue = std::collections::VecDeque::with_capacity(n);
        queue.push_back(v);
        let mut eccentricity = 0usize;
        let mut width = 0usize;
        while !queue.is_empty() {
            let level_size = queue.len();
            width = width.max(level_size);
            eccentricity += 1;
            for _ in 0..level_size {
                let u = queue.pop_front().unwrap();
                for &w in self.neighbors(u) {
                    if !self.visited[w] {
                        self.visited[w] = true;
                        queue.push_back(w);
                    }
                }
            }
        }
        eccentricity -= 1;
        (eccentricity, width)
    }

    /// Diameter of the graph: the maximum eccentricity over all vertices.
    /// Not used by the hot path; kept as a diagnostic, as in the reference.
    pub fn diameter(&mut self) -> usize {
        let n = self.n();
        let mut diameter = 0;
        for v in 0..n {
            self.bfs(v);
            if let Some(&ecc) = self.distances.iter().max() {
                diameter = diameter.max(ecc);
            }
        }
        diameter
    }

    /// §4.12: the final labeling must be a bijection onto `[0, n)`. Checked
    /// as four distinct diagnostics, matching the reference's `isFeasible`:
    /// uniqueness, starts from 0, ends at `n - 1`, and no gap in between.
    pub fn assert_feasible(&self) -> anyhow::Result<()> {
        let n = self.n();
        if n == 0 {
            return Ok(());
        }
        let unique_labels: std::collections::BTreeSet<usize> = self.labels.iter().copied().collect();

        anyhow::ensure!(
            unique_labels.len() == self.labels.len(),
            "labels are not unique"
        );
        anyhow::ensure!(
            matches!(unique_labels.iter().next(), Some(&0)),
            "labels do not start from 0"
        );
        anyhow::ensure!(
            matches!(unique_labels.iter().next_back(), Some(&l) if l == n - 1),
            "labels do not end in n - 1"
        );
        for (expected, &l) in unique_labels.iter().enumerate() {
            anyhow::ensure!(l == expected, "labels are not continuous");
        }

        Ok(())
    }
}
