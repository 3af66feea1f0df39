pub mod analysis;
pub mod estimate;
pub mod pipeline;
pub mod research;

pub use analysis::*;
pub use estimate::*;
pub use pipeline::*;
pub use research::*;
