//! Build-time application identity.

/// Name of the application; also scopes the config file and env prefix.
pub const APP_NAME: &str = "immuadmin";

/// Immutable build metadata reported by `immuadmin version`.
///
/// Apart from the name every field may be empty when the build did not
/// provide it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppIdentity {
    /// Application name
    pub name: String,
    /// Release version
    pub version: String,
    /// Source commit hash
    pub commit: String,
    /// Who or what produced the build
    pub built_by: String,
    /// Build timestamp, either Unix seconds or free-form text
    pub built_at: String,
}

impl AppIdentity {
    /// Creates an identity from its parts.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        commit: impl Into<String>,
        built_by: impl Into<String>,
        built_at: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            commit: commit.into(),
            built_by: built_by.into(),
            built_at: built_at.into(),
        }
    }

    /// Identity injected at compile time.
    ///
    /// Reads `IMMUADMIN_VERSION`, `IMMUADMIN_COMMIT`, `IMMUADMIN_BUILT_BY`
    /// and `IMMUADMIN_BUILT_AT` from the build environment. The version
    /// falls back to the crate version; the others stay empty.
    pub fn from_build() -> Self {
        Self::new(
            APP_NAME,
            option_env!("IMMUADMIN_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
            option_env!("IMMUADMIN_COMMIT").unwrap_or_default(),
            option_env!("IMMUADMIN_BUILT_BY").unwrap_or_default(),
            option_env!("IMMUADMIN_BUILT_AT").unwrap_or_default(),
        )
    }
}
