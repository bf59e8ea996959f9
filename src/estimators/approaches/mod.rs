pub mod common_nd;
pub mod ksg;

// Unified re-exports so users can import
// ksgte::estimators::approaches::* ergonomically.
pub use common_nd::metric::{Chebyshev, Euclidean, Manhattan, Metric, Minkowski};
pub use ksg::{KsgTransferEntropy, TEVars};
