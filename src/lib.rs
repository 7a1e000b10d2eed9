pub mod cli;
pub mod config;
pub mod error;
pub mod purge;
pub mod store;
pub mod tree;
pub mod utils;
