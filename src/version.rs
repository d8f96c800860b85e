//! Version information with embedded git metadata.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit SHA at build time, or "unknown" outside a checkout.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Build timestamp, or "unknown" if unavailable.
pub const BUILD_TIMESTAMP: &str = match option_env!("VERGEN_BUILD_TIMESTAMP") {
    Some(ts) => ts,
    None => "unknown",
};

/// Whether the working tree was dirty at build time.
pub fn git_dirty() -> bool {
    option_env!("VERGEN_GIT_DIRTY") == Some("true")
}

/// Whether the ONNX Runtime backend was compiled in.
pub fn local_inference_enabled() -> bool {
    cfg!(feature = "local-inference")
}

/// Full version string: `{version}+{sha}` with a `.dirty` suffix for dirty trees.
///
/// Examples:
/// - `0.1.0+abc1234`
/// - `0.1.0+abc1234.dirty`
/// - `0.1.0+unknown`
pub fn version_string() -> String {
    let dirty_suffix = if git_dirty() { ".dirty" } else { "" };
    format!(
        "{PKG_VERSION}+{}{dirty_suffix}",
        &GIT_SHA[..7.min(GIT_SHA.len())]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_pkg_version() {
        assert!(version_string().starts_with(PKG_VERSION));
    }

    #[test]
    fn version_string_has_short_sha() {
        let version = version_string();
        let suffix = version
            .trim_start_matches(PKG_VERSION)
            .trim_start_matches('+')
            .trim_end_matches(".dirty");
        assert!(suffix.len() <= 7, "sha should be shortened: {suffix}");
        assert!(!suffix.is_empty());
    }
}
