pub mod test_utils;

pub use test_utils::{init_tracing, FixtureResponse, FixtureServer};
