pub mod actions;
pub mod commands;
pub mod contracts;
pub mod error;
pub mod export;
pub mod ledger;
pub mod rfv;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use rfv::score::{ActionMap, RfvScore};
pub use rfv::{Segmentation, compute_rfv};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
