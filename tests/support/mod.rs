// tests/support/mod.rs
// Shared by several integration test binaries; each one only uses part of it.
#[allow(dead_code, unused_imports)]
pub mod mocks;

#[allow(dead_code, unused_imports)]
pub mod helpers;

#[allow(unused_imports)]
pub use mocks::*;

#[allow(unused_imports)]
pub use helpers::*;

#[allow(dead_code, unused_imports)]
pub mod scenarios;
