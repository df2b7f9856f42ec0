pub mod probe;

pub use probe::{probe, BrowserDescriptor, BrowserInfo, Environment};
