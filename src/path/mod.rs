mod expander;
mod normalize;

pub use expander::PathExpander;
pub use normalize::{normalize, resolve};
