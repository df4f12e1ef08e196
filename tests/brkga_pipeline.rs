//! End-to-end BRKGA scenario (spec.md §8 scenario 6): on a connected graph
//! with `n >= 20`, after a short deadline, the reported best profile is no
//! worse than the natural labeling's. Grounded on
//! `examples/vigna-webgraph-rs/cli/tests/test_llp_pipeline.rs`'s pattern of
//! driving the library directly from an integration test rather than
//! spawning the binary.

use std::io::Write;
use std::time::Duration;

use predicates::prelude::*;

use profile_reduce::brkga::{self, BrkgaParams, InitMethod};
use profile_reduce::mtx;
use profile_reduce::rng;

fn write_mtx(contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".mtx").tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

/// A connected graph on 24 vertices: a ring plus a handful of chords, so
/// it is neither a worst-case path nor trivially already profile-optimal.
fn ring_with_chords_mtx() -> String {
    let n = 24usize;
    let mut entries = Vec::new();
    for i in 0..n {
        let j = (i + 1) % n;
        entries.push((i.max(j) + 1, i.min(j) + 1));
    }
    for i in 0..n {
        let j = (i + 7) % n;
        let (hi, lo) = (i.max(j) + 1, i.min(j) + 1);
        if hi != lo {
            entries.push((hi, lo));
        }
    }
    entries.sort_unstable();
    entries.dedup();

    let mut doc = format!(
        "%%MatrixMarket matrix coordinate real symmetric\n{n} {n} {}\n",
        entries.len()
    );
    for (i, j) in entries {
        doc.push_str(&format!("{i} {j} 1\n"));
    }
    doc
}

#[test]
fn brkga_never_regresses_past_natural_labeling_on_a_connected_graph() {
    rng::seed(2026);
    let file = write_mtx(&ring_with_chords_mtx());
    let mut g = mtx::load(file.path(), false).unwrap();
    assert_eq!(g.n(), 24);

    let natural_profile = g.evaluate_profile();
    g.max_time = Duration::from_secs(1);

    let params = BrkgaParams {
        pop: 20,
        elite: 8,
        mutants: 4,
        prob: 0.75,
        init: InitMethod::MsWConstructive,
    };
    let best = brkga::run(&mut g, &params).unwrap();

    let never_worse = predicate::function(|&b: &usize| b <= natural_profile);
    assert!(
        never_worse.eval(&best),
        "BRKGA returned profile {best}, worse than natural labeling's {natural_profile}"
    );
    g.assert_feasible().unwrap();
}

#[test]
fn rejects_a_non_square_mtx_file() {
    let file = write_mtx("%%MatrixMarket matrix coordinate real general\n3 4 1\n1 1\n");
    let result = mtx::load(file.path(), false);
    assert!(result.is_err());
}
