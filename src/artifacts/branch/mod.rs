pub mod branch_name;

/// Name of the branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
