//! Linux and Android backend.
//!
//! There is no `PT_DENY_ATTACH` here. Clearing the dumpable flag is the
//! closest kernel directive: unprivileged `PTRACE_ATTACH` is refused and
//! `/proc/<pid>/mem` becomes root-only. On x86_64 and aarch64 `prctl` is
//! issued as a raw syscall so an interposed libc symbol never sees it. The
//! trace state is the `TracerPid` line of procfs status.

use crate::error::AntiDebugError;
use crate::presence::parse_tracer_pid;

pub(crate) fn current_pid() -> u32 {
    std::process::id()
}

#[inline(always)]
pub(crate) fn deny_attach() -> Result<(), AntiDebugError> {
    match prctl(libc::PR_SET_DUMPABLE, 0) {
        Ok(_) => Ok(()),
        Err(errno) => Err(AntiDebugError::DenyAttachFailed { errno }),
    }
}

// Raw prctl. The kernel returns -errno in the result register.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn prctl(option: libc::c_int, arg2: u64) -> Result<i64, i32> {
    let ret: i64;
    // SAFETY: the options issued here take integer arguments only. `syscall`
    // clobbers rcx and r11.
    unsafe {
        core::arch::asm!(
            "syscall",
            inlateout("rax") libc::SYS_prctl as i64 => ret,
            in("rdi") option as i64,
            in("rsi") arg2,
            in("rdx") 0u64,
            in("r10") 0u64,
            in("r8") 0u64,
            lateout("rcx") _,
            lateout("r11") _,
            options(nostack),
        );
    }
    decode_syscall_return(ret)
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn prctl(option: libc::c_int, arg2: u64) -> Result<i64, i32> {
    let ret: i64;
    // SAFETY: the options issued here take integer arguments only.
    unsafe {
        core::arch::asm!(
            "svc #0",
            in("x8") libc::SYS_prctl as u64,
            inlateout("x0") option as i64 => ret,
            in("x1") arg2,
            in("x2") 0u64,
            in("x3") 0u64,
            in("x4") 0u64,
            options(nostack),
        );
    }
    decode_syscall_return(ret)
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn prctl(option: libc::c_int, arg2: u64) -> Result<i64, i32> {
    // SAFETY: the options issued here take integer arguments only.
    let rc = unsafe { libc::prctl(option, arg2 as libc::c_ulong, 0, 0, 0) };
    if rc >= 0 {
        return Ok(i64::from(rc));
    }
    Err(std::io::Error::last_os_error()
        .raw_os_error()
        .unwrap_or(libc::EINVAL))
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[inline(always)]
fn decode_syscall_return(ret: i64) -> Result<i64, i32> {
    // -4095..=-1 is the kernel's errno range.
    if (-4095..0).contains(&ret) {
        Err((-ret) as i32)
    } else {
        Ok(ret)
    }
}

pub(crate) fn trace_flag(pid: u32) -> Result<bool, AntiDebugError> {
    let status = std::fs::read_to_string(format!("/proc/{pid}/status")).map_err(|err| {
        AntiDebugError::ProcessQueryFailed {
            pid,
            detail: err.to_string(),
        }
    })?;

    match parse_tracer_pid(&status) {
        Some(tracer_pid) => Ok(tracer_pid != 0),
        None => Err(AntiDebugError::ProcessQueryFailed {
            pid,
            detail: "TracerPid missing or malformed".to_string(),
        }),
    }
}
