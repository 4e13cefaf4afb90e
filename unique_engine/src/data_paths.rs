//! Locating the ruleset and content files `unique_audit` reads when none are given.
//!
//! The data directory is, in order: `$UNIQUE_DATA_DIR`, a `data/` directory under the
//! working directory that holds a `ruleset.toml`, or the `data/` directory bundled with
//! this crate. It is resolved once per process.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;

/// Environment variable that overrides data directory discovery.
pub const DATA_DIR_VAR: &str = "UNIQUE_DATA_DIR";
pub const RULESET_FILE: &str = "ruleset.toml";
pub const CONTENT_FILE: &str = "content.ron";

const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(|| {
    let cwd = env::current_dir().unwrap_or_default();
    let root = resolve_data_root(env::var_os(DATA_DIR_VAR).map(PathBuf::from), &cwd);
    debug!("data directory resolved to '{}'", root.display());
    root
});

/// Path of `relative` inside the resolved data directory.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

pub fn default_ruleset_path() -> PathBuf {
    data_path(RULESET_FILE)
}

pub fn default_content_path() -> PathBuf {
    data_path(CONTENT_FILE)
}

fn resolve_data_root(override_dir: Option<PathBuf>, cwd: &Path) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }
    let local = cwd.join("data");
    if local.join(RULESET_FILE).is_file() {
        return local;
    }
    PathBuf::from(BUNDLED_DATA_DIR)
}
