//! Platform boundary for the two OS primitives.
//!
//! Each backend exposes the same three functions:
//!
//! - `deny_attach`: ask the kernel to refuse future tracers for this process.
//! - `trace_flag`: read the kernel's "is traced" state for a PID.
//! - `current_pid`: PID of the calling process.
//!
//! Apple targets go through `ptrace(PT_DENY_ATTACH)` and `sysctl(KERN_PROC)`,
//! Linux and Android through `prctl(PR_SET_DUMPABLE)` and procfs. Anything
//! else gets the fallback, which reports `Unsupported`.

#[cfg(target_vendor = "apple")]
mod apple;
#[cfg(target_vendor = "apple")]
use apple as imp;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
#[cfg(any(target_os = "linux", target_os = "android"))]
use linux as imp;

#[cfg(not(any(target_vendor = "apple", target_os = "linux", target_os = "android")))]
mod fallback;
#[cfg(not(any(target_vendor = "apple", target_os = "linux", target_os = "android")))]
use fallback as imp;

pub(crate) use imp::{current_pid, deny_attach, trace_flag};
