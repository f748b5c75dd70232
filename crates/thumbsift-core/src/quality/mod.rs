pub mod detail;
pub mod diff;
pub mod edge;
pub mod laplacian;

pub use detail::DetailScorer;
pub use diff::DiffScorer;
pub use edge::EdgeDetector;
pub use laplacian::{EdgeMap, LaplacianDetector};
