//! Branch names and revision expressions
//!
//! - `branch_name`: validated branch names (git ref-name rules)
//! - `revision`: commit references such as `master`, `HEAD~2` or `3f2a9c1`

pub mod branch_name;
pub mod revision;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const PARENT_REGEX: &str = r"^(.+)\^$";
pub const ANCESTOR_REGEX: &str = r"^(.+)\~(\d+)$";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
