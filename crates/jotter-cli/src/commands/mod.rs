pub mod common;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod new;
pub mod prune;
pub mod show;
pub mod tags;
