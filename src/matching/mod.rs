//! Matching engine: normalization, fuzzy comparison and scoring

pub mod dates;
pub mod distance;
pub mod engine;
pub mod extract;
pub mod names;
pub mod normalize;

pub use dates::*;
pub use distance::*;
pub use engine::*;
pub use extract::*;
pub use names::*;
pub use normalize::*;
