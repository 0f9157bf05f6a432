pub mod error;
pub mod fetch;
pub mod process;
pub mod sql;
