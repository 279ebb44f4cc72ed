#[path = "../common/mod.rs"]
mod common;

mod interrupted_rm;
