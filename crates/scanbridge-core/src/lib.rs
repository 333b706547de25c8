pub mod constants;
pub mod epc;
pub mod error;

pub use epc::Epc;
pub use error::{Error, Result};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
