#[path = "../common/mod.rs"]
mod common;

mod stage_files;
