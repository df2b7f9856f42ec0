pub mod base;
pub mod reactive;

// Re-export from base.rs so we can do "use crate::identity::*;"
pub use base::{AuthState, AuthStateProvider, WaitPolicy};
pub use reactive::ReactiveAuthState;
