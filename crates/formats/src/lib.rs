pub mod dataset;
pub mod topology;

pub use dataset::*;
pub use topology::*;
