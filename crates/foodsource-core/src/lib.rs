// Library root: the confidence scoring engine plus the config, slate and
// board layers the binary and integration tests build on.

pub mod board;
pub mod config;
pub mod model;
pub mod scoring;
pub mod slate;
