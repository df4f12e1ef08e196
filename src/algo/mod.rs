//! Labeling algorithms: pseudo-peripheral search, the Sloan family, MPG,
//! and the multilevel coarsening engine.

pub mod mpg;
pub mod multilevel;
pub mod peripheral;
pub mod sloan;
