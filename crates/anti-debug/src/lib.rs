//! Anti-debugging self-protection primitives.
//!
//! - [`deny_debugger_attach`] asks the kernel to refuse debuggers for the rest
//!   of the process's life (skipped in debug builds).
//! - [`is_debugger_attached`] asks the kernel whether a tracer is attached.
//!
//! Both degrade to no-ops on platforms without an equivalent facility. What
//! to do about a detected debugger is up to the caller.

mod attach;
mod error;
mod presence;
mod profile;
mod sys;

pub use attach::{
    deny_debugger_attach, deny_debugger_attach_for, try_deny_debugger_attach, DenyAttach,
};
pub use error::AntiDebugError;
pub use presence::{current_pid, is_debugger_attached, parse_tracer_pid, process_trace_status};
pub use profile::BuildProfile;
