//! Profile-reduction engine for sparse symmetric graphs: CSR storage, an
//! indexed max-heap, pseudo-peripheral endpoint search, the Sloan and MPG
//! labeling families, a multilevel coarsening engine, a random-key codec,
//! and a BRKGA driver that composes all of the above as a population
//! search over vertex permutations.

pub mod algo;
pub mod brkga;
pub mod codec;
pub mod graph;
pub mod heap;
pub mod mtx;
pub mod rng;

#[cfg(test)]
mod test_fixtures;

pub mod prelude {
    pub use crate::algo::{mpg, multilevel, peripheral, sloan};
    pub use crate::brkga::{self, BrkgaParams, InitMethod};
    pub use crate::codec;
    pub use crate::graph::Graph;
    pub use crate::heap::IndexedMaxHeap;
}
