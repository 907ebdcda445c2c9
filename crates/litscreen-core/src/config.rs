//! Path helpers for user-supplied locations.
//!
//! Uses shellexpand so cache directories configured as `~/.litscreen_cache`
//! or `$XDG_CACHE_HOME/litscreen` resolve the way a shell would resolve them.

use std::borrow::Cow;
use std::path::PathBuf;

/// Expand `${VAR}`/`$VAR` and a leading `~` in a user-provided path string.
/// No canonicalization is attempted; the path need not exist.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let with_env = shellexpand::env(s).unwrap_or(Cow::Borrowed(s));
    PathBuf::from(shellexpand::tilde(&with_env).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_pass_through() {
        assert_eq!(expand_path("/tmp/cache"), PathBuf::from("/tmp/cache"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let expanded = expand_path("~/.litscreen_cache");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with(".litscreen_cache"));
    }

    #[test]
    fn env_vars_expand() {
        std::env::set_var("LITSCREEN_TEST_BASE", "/var/data");
        assert_eq!(
            expand_path("${LITSCREEN_TEST_BASE}/cache"),
            PathBuf::from("/var/data/cache")
        );
    }
}
