use crate::error::AntiDebugError;

// Not every target has pids (wasm, some embedded), so no std::process::id.
pub(crate) fn current_pid() -> u32 {
    0
}

pub(crate) fn deny_attach() -> Result<(), AntiDebugError> {
    tracing::warn!("deny_attach is a stub on this platform");
    Err(AntiDebugError::Unsupported {
        operation: "deny_attach",
    })
}

pub(crate) fn trace_flag(pid: u32) -> Result<bool, AntiDebugError> {
    tracing::warn!(pid, "trace_flag is a stub on this platform");
    Err(AntiDebugError::Unsupported {
        operation: "trace_flag",
    })
}
