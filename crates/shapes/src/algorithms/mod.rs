pub mod preprocessing;
pub mod extraction;
pub mod ordering;
pub mod simplification;
pub mod classification;
pub mod geometry;

pub use preprocessing::*;
pub use extraction::*;
pub use ordering::*;
pub use simplification::*;
pub use classification::*;
