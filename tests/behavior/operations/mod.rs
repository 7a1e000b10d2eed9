pub mod containers;
pub mod purge;
pub mod stat;
