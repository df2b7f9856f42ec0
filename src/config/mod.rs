// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod config;
pub mod guard;
pub mod identity;
pub mod logging;
pub mod storage;

pub use config::*;
pub use guard::*;
pub use identity::*;
pub use logging::*;
pub use storage::*;
