mod dimacs;
pub use dimacs::*;
mod formula;
pub use formula::*;
mod solution;
pub use solution::*;
