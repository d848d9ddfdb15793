//! Process environment helpers.

use std::env;
use std::path::PathBuf;

use crate::error::EnvError;

/// Value of the environment variable `key`, or `fallback` when it is unset.
///
/// A variable set to the empty string counts as set. A value that is not
/// valid unicode is still returned, with invalid sequences replaced by
/// U+FFFD.
pub fn get_env_key(key: &str, fallback: &str) -> String {
    match env::var_os(key) {
        Some(value) => value.to_string_lossy().into_owned(),
        None => fallback.to_string(),
    }
}

/// Absolute path of the directory holding the running executable.
pub fn get_current_directory() -> Result<PathBuf, EnvError> {
    let exe = env::current_exe().map_err(EnvError::CurrentExe)?;
    match exe.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Err(EnvError::NoParent(exe)),
    }
}
