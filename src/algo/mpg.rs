//! MPG dual-queue labeler (spec.md §4.5).
//!
//! Two coupled priority queues: `q` holds vertices already committed or
//! eligible to join `t`; `t` holds vertices eligible to be labeled next.
//! At each round one new vertex is admitted into `q` by scanning the
//! neighborhood of `t`'s members for the candidate with maximum
//! `2p(n) + 2 max(p(adj(n) in t)) + 3a(n)`, then `t` is drained of every
//! vertex whose current degree has reached zero. Grounded on
//! `examples/original_source/src/heuristics.cpp`'s `mpg()`.

use crate::algo::peripheral;
use crate::graph::Graph;
use crate::heap::IndexedMaxHeap;

const UNLABELED: usize = usize::MAX;

pub fn mpg(g: &mut Graph) {
    let n = g.n();
    g.labels = vec![UNLABELED; n];

    let (s, e) = peripheral::sloan_pp(g);
    g.bfs(e);
    let d_e = g.distances.clone();

    let mut d: Vec<i64> = g.deg.iter().map(|&x| x as i64).collect();
    let mut p: Vec<i64> = (0..n).map(|i| d_e[i] as i64 - 2 * d[i]).collect();
    let mut a: Vec<i64> = vec![0; n];

    let mut q: IndexedMaxHeap<i64> = IndexedMaxHeap::with_capacity(n);
    let mut t: IndexedMaxHeap<i64> = IndexedMaxHeap::with_capacity(n);

    let mut current_label = 0usize;
    let mut chosen = s;

    while current_label < n {
        // Admit the best neighbor-of-t candidate into q.
        let mut pi_max = i64::MIN;
        let t_members: Vec<usize> = t.keys().collect();
        for u in t_members {
            for &cand in g.neighbors(u) {
                if g.labels[cand] != UNLABELED || q.contains(cand) {
                    continue;
                }
                let mut p_max = i64::MIN;
                for &adj in g.neighbors(cand) {
                    if t.contains(adj) && p[adj] > p_max {
                        p_max = p[adj];
                    }
                }
                let pi = 2 * p[cand] + 2 * p_max + 3 * a[cand];
                if pi > pi_max {
                    pi_max = pi;
                    chosen = cand;
                }
            }
        }

        if g.labels[chosen] == UNLABELED && !q.contains(chosen) {
            q.insert(chosen, p[chosen]);

            for &j in g.neighbors(chosen) {
                d[j] -= 1;
                a[j] += 1;
                p[j] = d_e[j] as i64 - 2 * d[j];
                if q.contains(j) {
                    q.change_priority(j, p[j]);
                }
                if t.contains(j) {
                    t.change_priority(j, p[j]);
                } else if q.contains(j) && d[j] == 1 {
                    t.insert(j, p[j]);
                }
            }
        }

        // Drain t, labeling every vertex whose current degree hit zero;
        // vertices with degree <= 1 that didn't qualify stay eligible.
        let mut reinsert: Vec<(usize, i64)> = Vec::new();
        while let Some((i, p_i)) = t.extract_max() {
            if d[i] == 0 {
                g.labels[i] = current_label;
                current_label += 1;
                if q.contains(i) {
                    q.remove(i);
                    for &j in g.neighbors(i) {
                        a[j] -= 1;
                    }
                }
            } else if d[i] <= 1 {
                reinsert.push((i, p_i));
            }
        }
        for (i, p_i) in reinsert {
            t.insert(i, p_i);
        }

        // If t ran dry, rebuild it from q's near-top vertices.
        if t.is_empty() && !q.is_empty() {
            let p_max_q = q.peek_priority().unwrap() - 1;
            let q_members: Vec<(usize, i64)> =
                q.keys().map(|k| (k, q.priority_of(k).unwrap())).collect();
            for (i, pri) in q_members {
                if pri >= p_max_q {
                    t.insert(i, pri);
                }
            }
        }
    }

    g.evaluate_profile();
}
