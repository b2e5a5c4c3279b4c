pub mod color;
pub mod format;
pub mod ids;
pub mod scale;

// Foundation crate: small, well-tested primitives only.
pub use color::*;
pub use format::*;
pub use ids::*;
pub use scale::*;
