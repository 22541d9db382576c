pub mod constants;
pub mod error;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use schema::{CapabilitySchema, Permission, ValueFormat, ValueUnit};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
