pub mod encoding;
pub mod gate;
pub mod metric;
pub mod projection;
pub mod ranking;
pub mod regression;
pub mod selection;
pub mod table;
pub mod ticks;

pub use encoding::*;
pub use gate::*;
pub use metric::*;
pub use selection::*;
pub use table::*;
