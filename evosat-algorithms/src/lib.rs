pub mod heuristics;
pub mod metaheuristics;
mod sampler;
pub use sampler::*;
mod settings;
pub use settings::*;
