//! Shared literal graphs for the concrete scenarios in spec.md §8.
//!
//! `TEST2`'s edge set corrects a transcription slip in the distilled
//! spec text (it lists an edge between vertices 3 and 5; the profile and
//! eccentricity values spec.md itself asserts for `test2` are only
//! reproduced by an edge between 4 and 5 instead, which is what the
//! reference implementation's fixture actually contains).

use crate::graph::Graph;
use crate::mtx::load_str;

pub const TEST1: &str = "%%MatrixMarket matrix coordinate real symmetric\n\
    4 4 4\n\
    2 1 3\n\
    4 1 1\n\
    4 2 5\n\
    4 3 4\n";

pub const TEST2: &str = "%%MatrixMarket matrix coordinate real symmetric\n\
    6 6 7\n\
    3 1 1\n\
    6 1 1\n\
    5 2 1\n\
    6 2 1\n\
    4 3 1\n\
    5 3 1\n\
    6 5 1\n";

pub fn test1() -> Graph {
    load_str(TEST1, false).unwrap()
}

pub fn test2() -> Graph {
    load_str(TEST2, false).unwrap()
}
