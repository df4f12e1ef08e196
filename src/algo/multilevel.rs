//! Multilevel coarsening engine (spec.md §4.6-§4.9).
//!
//! Coarsens the graph through a maximal independent set, recurses on the
//! coarse graph, then prolongs the coarse labeling back down as a
//! priority vector for an Sloan-family refinement pass at the fine
//! level, twice per level (a W-cycle). Grounded on
//! `examples/original_source/src/multilevel.cpp`'s `maximalIndependentSet`,
//! `getCoarseGraph`, `sloanRefine`, `msW` and `msWConstrutiveSM`.
//!
//! `msW`/`msWConstrutiveSM` track recursion depth in a `thread_local
//! usize level` in the reference implementation. That is safe there only
//! because the whole engine runs on one thread; ported literally to Rust
//! it would silently corrupt concurrent calls (e.g. two BRKGA workers
//! coarsening different graphs on different threads) since all calls on
//! a thread would share one counter regardless of which recursion they
//! belong to. Here `level` is an ordinary call parameter instead, so each
//! recursion tree carries its own count on the stack.

use crate::algo::mpg;
use crate::algo::sloan;
use crate::graph::Graph;
use crate::heap::IndexedMaxHeap;
use crate::rng;

const MAX_LEVEL: usize = 1;
const MAX_RATIO: f64 = 0.8;
const MAX_ACC_NEIGHBORS_1: usize = 19_000_000;
const MAX_ACC_NEIGHBORS_2: usize = 47_000_000;

/// Which labeler refines the coarsest graph.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AlgoBase {
    SloanMgps,
    Mpg,
}

/// Greedy maximal independent set by descending degree, with gain
/// updates as neighbors are excluded (spec.md §4.7).
pub fn maximal_independent_set(g: &Graph) -> Vec<usize> {
    let n = g.n();
    let mut uncolored = vec![true; n];
    let mut colored = Vec::with_capacity(n / 4 + 1);
    let mut gain: IndexedMaxHeap<usize> = IndexedMaxHeap::with_capacity(n);

    for i in 0..n {
        gain.insert(i, g.deg[i]);
    }

    while let Some((i_max, _)) = gain.extract_max() {
        uncolored[i_max] = false;
        colored.push(i_max);

        for &j in g.neighbors(i_max) {
            if uncolored[j] {
                gain.remove(j);
                uncolored[j] = false;

                for &k in g.neighbors(j) {
                    if uncolored[k] {
                        let weight = gain.priority_of(k).unwrap() + 1;
                        gain.change_priority(k, weight);
                    }
                }
            }
        }
    }

    colored
}

/// Builds the coarse graph from a maximal independent set: each coarse
/// vertex is an MIS seed, coarse edges come from a depth-<=2 BFS per
/// seed in the fine graph, with soft work-bounding guards against
/// quadratic blowup on dense fine neighborhoods (spec.md §4.8).
pub fn coarse_graph(g: &mut Graph, mis: &[usize]) -> Graph {
    let n = g.n();
    let coarse_m = mis.len();
    const UNMAPPED: usize = usize::MAX;

    let mut fine_to_coarse = vec![UNMAPPED; n];
    for (i, &v) in mis.iter().enumerate() {
        fine_to_coarse[v] = i;
    }

    let mut coarse_neighbors: Vec<std::collections::BTreeSet<usize>> =
        vec![std::collections::BTreeSet::new(); coarse_m];

    g.visited.clear();
    g.visited.resize(n, false);
    let mut visit_time = vec![0usize; n];
    let mut current_time = 0usize;

    for (i, &start_fine) in mis.iter().enumerate() {
        let mut connected = !coarse_neighbors[i].is_empty();
        current_time += 1;

        let mut queue: std::collections::VecDeque<(usize, usize)> = std::collections::VecDeque::new();
        queue.push_back((start_fine, 0));
        visit_time[start_fine] = current_time;

        while let Some((v, dist)) = queue.pop_front() {
            if connected {
                let n_neighbor = g.neighbors(v).len();
                let total1 = n_neighbor * queue.len();
                let total2 = n_neighbor * coarse_m;
                if total1 >= MAX_ACC_NEIGHBORS_1 || total2 >= MAX_ACC_NEIGHBORS_2 {
                    queue.clear();
                    break;
                }
            }

            let new_dist = dist + 1;
            for &neighbor in g.neighbors(v) {
                if visit_time[neighbor] != current_time {
                    visit_time[neighbor] = current_time;
                    if new_dist < 3 {
                        queue.push_back((neighbor, new_dist));
                    }

                    let coarse_u = fine_to_coarse[neighbor];
                    if coarse_u != UNMAPPED && neighbor != start_fine {
                        coarse_neighbors[i].insert(coarse_u);
                        connected = true;
                        coarse_neighbors[coarse_u].insert(i);
                    }
                }
            }
        }
    }

    let mut row_ptr = vec![0usize; coarse_m + 1];
    let mut col_idx = Vec::new();
    for i in 0..coarse_m {
        row_ptr[i + 1] = row_ptr[i] + coarse_neighbors[i].len();
        col_idx.extend(coarse_neighbors[i].iter().copied());
    }

    Graph::from_csr(row_ptr, col_idx)
}

/// Prolongs a coarse labeling into a fine-level priority vector (spec.md
/// §4.9): MIS vertices take their coarse label (1-based); every other
/// vertex takes the average priority of its MIS neighbors.
pub fn sloan_refine(g: &Graph, coarse: &Graph, mis: &[usize]) -> Vec<f64> {
    let n = g.n();
    let mut priority = vec![0.0f64; n];
    for (i, &v) in mis.iter().enumerate() {
        priority[v] = (coarse.labels[i] + 1) as f64;
    }

    let mis_set: std::collections::HashSet<usize> = mis.iter().copied().collect();

    for i in 0..n {
        if mis_set.contains(&i) {
            continue;
        }
        let mut acc = 0.0f64;
        let mut count = 0usize;
        for &j in g.neighbors(i) {
            if mis_set.contains(&j) {
                acc += priority[j];
                count += 1;
            }
        }
        priority[i] = acc / count as f64;
    }

    priority
}

fn base_case(g: &mut Graph, priority: Option<&[f64]>, algo_base: AlgoBase) {
    match (priority, algo_base) {
        (Some(p), _) => sloan::enhanced_sloan_mgps_priority(g, Some(p)),
        (None, AlgoBase::SloanMgps) => sloan::enhanced_sloan_mgps_priority(g, None),
        (None, AlgoBase::Mpg) => mpg::mpg(g),
    }
}

fn base_case_constructive(g: &mut Graph, priority: Option<&[f64]>) {
    match priority {
        Some(p) => sloan::enhanced_sloan_mgps_priority2(g, Some(p)),
        None => sloan::constructive_n_sloan_mgps(g, rng::uniform_01_inclusive()),
    }
}

/// Multilevel Sloan-MGPS/MPG refinement, W-cycle recursion (spec.md
/// §4.6). `priority` seeds the finest level's refinement; pass `None` to
/// start from BFS distance.
pub fn ms_w(g: &mut Graph, priority: Option<&[f64]>, algo_base: AlgoBase, level: usize) {
    if level >= MAX_LEVEL || g.n() <= 2 {
        base_case(g, priority, algo_base);
        return;
    }

    let mis = maximal_independent_set(g);
    let mut coarse = coarse_graph(g, &mis);

    let ratio = coarse.n() as f64 / g.n() as f64;
    if ratio > MAX_RATIO {
        base_case(g, priority, algo_base);
        return;
    }

    ms_w(&mut coarse, priority, algo_base, level + 1);

    let priority1 = sloan_refine(g, &coarse, &mis);
    sloan::enhanced_sloan_mgps_priority(g, Some(&priority1));

    let pri: Vec<f64> = g.labels.iter().map(|&v| v as f64).collect();
    ms_w(&mut coarse, Some(&pri), algo_base, level + 1);

    let priority2 = sloan_refine(g, &coarse, &mis);
    sloan::enhanced_sloan_mgps_priority(g, Some(&priority2));
}

/// As [`ms_w`], but refining with [`sloan::constructive_n_sloan_mgps`] /
/// [`sloan::enhanced_sloan_mgps_priority2`] instead, for BRKGA population
/// seeding (spec.md §4.6).
pub fn ms_w_constructive(g: &mut Graph, priority: Option<&[f64]>, level: usize) {
    if level >= MAX_LEVEL || g.n() <= 2 {
        base_case_constructive(g, priority);
        return;
    }

    let mis = maximal_independent_set(g);
    let mut coarse = coarse_graph(g, &mis);

    let ratio = coarse.n() as f64 / g.n() as f64;
    if ratio > MAX_RATIO {
        base_case_constructive(g, priority);
        return;
    }

    ms_w_constructive(&mut coarse, priority, level + 1);

    let priority1 = sloan_refine(g, &coarse, &mis);
    sloan::enhanced_sloan_mgps_priority2(g, Some(&priority1));

    let pri: Vec<f64> = g.labels.iter().map(|&v| v as f64).collect();
    ms_w_constructive(&mut coarse, Some(&pri), level + 1);

    let priority2 = sloan_refine(g, &coarse, &mis);
    sloan::enhanced_sloan_mgps_priority2(g, Some(&priority2));
}
