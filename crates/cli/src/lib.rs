//! Public library modules for the CLI crate
pub mod add;
pub mod args;
pub mod paths;
pub mod pick;
