pub mod context;
pub mod error;
pub mod graph;
pub mod input;
pub mod log;
pub mod manage;
pub mod output;
pub mod route;
