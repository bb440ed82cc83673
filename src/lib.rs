pub mod api;
pub mod args;
pub mod cli;
pub mod config;
pub mod emit;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod lrc;
pub mod normalize;
pub mod paths;
pub mod pipeline;
pub mod qq;
pub mod query;
pub mod variant;
