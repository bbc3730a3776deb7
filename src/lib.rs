pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod testing;
pub mod usecase;
