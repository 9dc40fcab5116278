pub mod auth;
pub mod completions;
pub mod list;
pub mod migrate;
pub mod preset;
pub mod probe;
