//! Library exports for routegate, shared between the binary and tests.

pub mod browser;
pub mod config;
pub mod guard;
pub mod identity;
pub mod routes;
pub mod startup;
pub mod state;
pub mod storage;
pub mod utils;
