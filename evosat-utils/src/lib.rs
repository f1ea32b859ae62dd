mod json;
pub use json::*;
mod seed;
pub use seed::*;
