//! Pseudo-peripheral endpoint search (spec.md §4.3).
//!
//! Two variants, both approximating the graph's diameter endpoints from a
//! rooted level structure: the Sloan variant (feeds MPG) and the MGPS
//! variant (feeds the Sloan-family labelers and the multilevel engine).

use crate::graph::Graph;
use crate::rng;

fn min_degree_start(g: &Graph) -> usize {
    let candidates: Vec<usize> = (0..g.n()).filter(|&v| g.deg[v] == g.min_deg).collect();
    let idx = rng::uniform_usize(0, candidates.len() - 1);
    candidates[idx]
}

/// Sloan's pseudo-peripheral pair, used by the MPG labeler.
pub fn sloan_pp(g: &mut Graph) -> (usize, usize) {
    let mut s = min_degree_start(g);
    let mut e = 0usize;

    loop {
        let (last_level_s, ecc_s) = g.last_level_and_eccentricity(s);

        let mut f: Vec<(usize, usize)> = last_level_s.iter().map(|&v| (v, g.deg[v])).collect();
        f.sort_by_key(|&(_, d)| d);
        f.dedup_by_key(|&mut (_, d)| d);

        let mut width_e = usize::MAX;
        let mut restarted = false;

        for &(i, _) in &f {
            let (ecc_i, width_i) = g.eccentricity_and_width(i);
            if ecc_i > ecc_s && width_i < width_e {
                s = i;
                restarted = true;
                break;
            } else if width_i < width_e {
                e = i;
                width_e = width_i;
            }
        }

        if !restarted {
            return (s, e);
        }
    }
}

/// The MGPS pseudo-peripheral pair, used by the Sloan-family labelers and
/// the multilevel engine's base cases.
pub fn mgps_pp(g: &mut Graph) -> (usize, usize) {
    let mut s = min_degree_start(g);
    let mut e = 0usize;
    let mut considered: std::collections::HashSet<usize> = std::collections::HashSet::new();

    loop {
        let (mut last_level_s, ecc_s) = g.last_level_and_eccentricity(s);
        last_level_s.sort_by_key(|&v| g.deg[v]);

        let mut pruned: Vec<usize> = Vec::new();
        for &i in &last_level_s {
            let discard = g.neighbors(i).iter().any(|n| considered.contains(n));
            if discard {
                continue;
            }
            pruned.push(i);
            considered.insert(i);
            if pruned.len() >= 5 {
                break;
            }
        }

        let mut width_e = usize::MAX;
        let mut restarted = false;

        for &i in &pruned {
            let (ecc_i, width_i) = g.eccentricity_and_width(i);
            if ecc_i > ecc_s && width_i < width_e {
                s = i;
                restarted = true;
                break;
            } else if width_i < width_e {
                e = i;
                width_e = width_i;
            }
        }

        if !restarted {
            break;
        }
    }

    let (ecc_s, w_s) = g.eccentricity_and_width(s);
    let (ecc_e, w_e) = g.eccentricity_and_width(e);
    if ecc_e > ecc_s || (ecc_e == ecc_s && w_e < w_s) {
        std::mem::swap(&mut s, &mut e);
    }

    (s, e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mtx::load;
    use crate::test_fixtures::test2;
    use std::io::Write;

    fn fixture(contents: &str) -> Graph {
        let mut f = tempfile::Builder::new().suffix(".mtx").tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        load(f.path(), false).unwrap()
    }

    const TEST1: &str = "%%MatrixMarket matrix coordinate real symmetric\n\
        4 4 4\n2 1 3\n4 1 1\n4 2 5\n4 3 4\n";

    #[test]
    fn eccentricity_and_width_test1() {
        rng::seed(1);
        let mut g = fixture(TEST1);
        assert_eq!(g.eccentricity_and_width(0), (2, 2));
        assert_eq!(g.eccentricity_and_width(3), (1, 3));
    }

    #[test]
    fn last_level_test1() {
        rng::seed(1);
        let mut g = fixture(TEST1);
        let (last, ecc) = g.last_level_and_eccentricity(0);
        assert_eq!(ecc, 2);
        assert_eq!(last, vec![2]);

        let (mut last, ecc) = g.last_level_and_eccentricity(3);
        last.sort_unstable();
        assert_eq!(ecc, 1);
        assert_eq!(last, vec![0, 1, 2]);
    }

    #[test]
    fn mgps_pp_produces_valid_pair() {
        rng::seed(1);
        let mut g = fixture(TEST1);
        let (s, e) = mgps_pp(&mut g);
        assert!(s < g.n() && e < g.n());
    }

    #[test]
    fn last_level_test2() {
        let mut g = test2();
        let (mut last, ecc) = g.last_level_and_eccentricity(0);
        last.sort_unstable();
        assert_eq!(ecc, 2);
        assert_eq!(last, vec![1, 3, 4]);

        let (mut last, ecc) = g.last_level_and_eccentricity(3);
        last.sort_unstable();
        assert_eq!(ecc, 3);
        assert_eq!(last, vec![1, 5]);
    }

    #[test]
    fn sloan_pp_produces_valid_pair_test2() {
        rng::seed(1);
        let mut g = test2();
        let (s, e) = sloan_pp(&mut g);
        assert!(s < g.n() && e < g.n());
    }
}
