use std::fmt;

const COMPILETIME_BUILD_PROFILE: Option<&str> = option_env!("ANTI_DEBUG_BUILD_PROFILE");

/// Build flavour that decides whether attach denial runs.
///
/// Resolved once at compile time into [`BuildProfile::ACTIVE`]. A `Debug`
/// build leaves the process attachable so developers can still step through
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    /// Profile baked into this build.
    ///
    /// `ANTI_DEBUG_BUILD_PROFILE=debug|release` at compile time overrides the
    /// default, which follows `debug_assertions`.
    pub const ACTIVE: BuildProfile =
        Self::resolve(COMPILETIME_BUILD_PROFILE, cfg!(debug_assertions));

    const fn resolve(raw: Option<&str>, debug_assertions: bool) -> Self {
        if let Some(raw) = raw {
            if let Some(profile) = Self::parse(raw) {
                return profile;
            }
        }
        if debug_assertions {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Parses `debug` or `release`, ignoring ASCII case and surrounding
    /// whitespace.
    pub const fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.as_bytes().trim_ascii();
        if eq_ignore_ascii_case(trimmed, b"debug") {
            Some(Self::Debug)
        } else if eq_ignore_ascii_case(trimmed, b"release") {
            Some(Self::Release)
        } else {
            None
        }
    }

    pub const fn denies_attach(self) -> bool {
        matches!(self, Self::Release)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// `lower` must already be lowercase.
const fn eq_ignore_ascii_case(raw: &[u8], lower: &[u8]) -> bool {
    if raw.len() != lower.len() {
        return false;
    }
    let mut i = 0;
    while i < raw.len() {
        if raw[i].to_ascii_lowercase() != lower[i] {
            return false;
        }
        i += 1;
    }
    true
}
