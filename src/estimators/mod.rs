pub mod approaches;
pub mod traits;
pub mod transfer_entropy;

pub use traits::{
    ConditionalTransferEntropyEstimator, GlobalValue, LocalValues, TransferEntropyEstimator,
};
