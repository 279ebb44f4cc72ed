#[path = "../common/mod.rs"]
mod common;

mod show_log_from_head_commit;
