//! Debugger presence check.
//!
//! Asks the kernel's generic process-information interface whether a tracer
//! is attached, rather than a debugger-specific API a hook could answer.

use crate::error::AntiDebugError;
use crate::sys;

/// Returns `true` if the kernel reports a tracer attached to this process.
///
/// A failed query reports `false`: this never produces a false positive, but
/// "unknown" and "not traced" look the same. Use [`process_trace_status`]
/// to tell them apart.
pub fn is_debugger_attached() -> bool {
    traced_or_false(process_trace_status(current_pid()))
}

fn traced_or_false(status: Result<bool, AntiDebugError>) -> bool {
    match status {
        Ok(traced) => traced,
        Err(err) => {
            tracing::trace!(code = err.code(), error = %err, "trace status query failed");
            false
        }
    }
}

/// Kernel trace state of `pid`: `Ok(true)` when traced, `Ok(false)` when
/// not, `Err` when the query itself failed.
pub fn process_trace_status(pid: u32) -> Result<bool, AntiDebugError> {
    sys::trace_flag(pid)
}

pub fn current_pid() -> u32 {
    sys::current_pid()
}

/// Extracts the `TracerPid:` value from a procfs `status` document.
pub fn parse_tracer_pid(status: &str) -> Option<u32> {
    for line in status.lines() {
        let Some(raw) = line.strip_prefix("TracerPid:") else {
            continue;
        };
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        return value.parse::<u32>().ok();
    }
    None
}
