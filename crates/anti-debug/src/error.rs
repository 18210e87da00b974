use std::fmt;

/// Failure of an OS-level anti-debug primitive.
///
/// Only the diagnostic entry points return this. [`crate::deny_debugger_attach`]
/// and [`crate::is_debugger_attached`] swallow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AntiDebugError {
    DenyAttachFailed { errno: i32 },
    ProcessQueryFailed { pid: u32, detail: String },
    Unsupported { operation: &'static str },
}

impl AntiDebugError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DenyAttachFailed { .. } => "deny_attach_failed",
            Self::ProcessQueryFailed { .. } => "process_query_failed",
            Self::Unsupported { .. } => "unsupported_platform",
        }
    }

    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::DenyAttachFailed { errno } => Some(*errno),
            _ => None,
        }
    }
}

impl fmt::Display for AntiDebugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DenyAttachFailed { errno } => write!(
                f,
                "deny-attach request failed: {}",
                std::io::Error::from_raw_os_error(*errno)
            ),
            Self::ProcessQueryFailed { pid, detail } => {
                write!(f, "process info query for pid {pid} failed: {detail}")
            }
            Self::Unsupported { operation } => {
                write!(f, "{operation} is not supported on this platform")
            }
        }
    }
}

impl std::error::Error for AntiDebugError {}
