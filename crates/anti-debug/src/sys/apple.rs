//! Darwin backend.
//!
//! `PT_DENY_ATTACH` is issued as a raw supervisor call on the 64-bit
//! architectures so that an interposed `ptrace` symbol never sees it. The
//! trace flag comes from `kinfo_proc.kp_proc.p_flag`, read as raw bytes since
//! the `libc` crate no longer exposes `kinfo_proc` for these targets.

use crate::error::AntiDebugError;

const PT_DENY_ATTACH: libc::c_int = 31;

#[cfg(any(target_arch = "aarch64", target_arch = "x86_64"))]
const SYS_PTRACE: u64 = 26;

// sizeof(struct kinfo_proc) on 64-bit Darwin; larger than the 32-bit layout.
const KINFO_PROC_CAPACITY: usize = 648;
// offsetof(kinfo_proc, kp_proc.p_flag): p_un, p_vmspace and p_sigacts precede it.
const P_FLAG_OFFSET: usize = 4 * std::mem::size_of::<usize>();
const P_TRACED: i32 = 0x0000_0800;

#[repr(C, align(8))]
struct KinfoProcBuffer([u8; KINFO_PROC_CAPACITY]);

pub(crate) fn current_pid() -> u32 {
    // SAFETY: getpid has no preconditions and cannot fail.
    unsafe { libc::getpid() as u32 }
}

#[inline(always)]
pub(crate) fn deny_attach() -> Result<(), AntiDebugError> {
    match ptrace_deny_attach() {
        Ok(()) => Ok(()),
        // Already denied.
        Err(errno) if errno == libc::ENOTSUP => Ok(()),
        Err(errno) => Err(AntiDebugError::DenyAttachFailed { errno }),
    }
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn ptrace_deny_attach() -> Result<(), i32> {
    let ret: u64;
    let failed: u64;
    // SAFETY: PT_DENY_ATTACH reads no memory from the caller. The kernel
    // reports errors through the carry flag with the errno in x0 and may
    // overwrite x1 with a second return value.
    unsafe {
        core::arch::asm!(
            "svc #0x80",
            "cset {failed}, cs",
            failed = out(reg) failed,
            in("x16") SYS_PTRACE,
            inlateout("x0") PT_DENY_ATTACH as u64 => ret,
            inlateout("x1") 0u64 => _,
            in("x2") 0u64,
            in("x3") 0u64,
            options(nostack),
        );
    }
    if failed != 0 {
        Err(ret as i32)
    } else {
        Ok(())
    }
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn ptrace_deny_attach() -> Result<(), i32> {
    // BSD syscall class.
    const SYSCALL_CLASS_UNIX: u64 = 0x0200_0000;

    let ret: u64;
    let failed: u8;
    // SAFETY: as above. `syscall` clobbers rcx and r11, and rdx may carry a
    // second return value.
    unsafe {
        core::arch::asm!(
            "syscall",
            "setc {failed}",
            failed = out(reg_byte) failed,
            inlateout("rax") SYSCALL_CLASS_UNIX | SYS_PTRACE => ret,
            in("rdi") PT_DENY_ATTACH as u64,
            in("rsi") 0u64,
            inlateout("rdx") 0u64 => _,
            in("r10") 0u64,
            lateout("rcx") _,
            lateout("r11") _,
            options(nostack),
        );
    }
    if failed != 0 {
        Err(ret as i32)
    } else {
        Ok(())
    }
}

#[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
fn ptrace_deny_attach() -> Result<(), i32> {
    // SAFETY: PT_DENY_ATTACH ignores the pid, addr and data arguments.
    let ret = unsafe { libc::ptrace(PT_DENY_ATTACH, 0, std::ptr::null_mut::<libc::c_char>(), 0) };
    if ret == 0 {
        return Ok(());
    }
    Err(std::io::Error::last_os_error()
        .raw_os_error()
        .unwrap_or(libc::EINVAL))
}

pub(crate) fn trace_flag(pid: u32) -> Result<bool, AntiDebugError> {
    let query_failed = |detail: String| AntiDebugError::ProcessQueryFailed { pid, detail };

    let pid_arg = libc::pid_t::try_from(pid)
        .map_err(|_| query_failed(format!("pid {pid} is out of range")))?;
    let mut mib: [libc::c_int; 4] = [libc::CTL_KERN, libc::KERN_PROC, libc::KERN_PROC_PID, pid_arg];
    // Zeroed so p_flag reads as untraced unless the kernel writes it.
    let mut info = KinfoProcBuffer([0u8; KINFO_PROC_CAPACITY]);
    let mut size = KINFO_PROC_CAPACITY;

    // SAFETY: `mib` holds four valid ints, `info` is writable for `size`
    // bytes, and no new value is being set.
    let ret = unsafe {
        libc::sysctl(
            mib.as_mut_ptr(),
            mib.len() as libc::c_uint,
            info.0.as_mut_ptr().cast::<libc::c_void>(),
            &mut size,
            std::ptr::null_mut(),
            0,
        )
    };
    if ret != 0 {
        return Err(query_failed(format!(
            "sysctl(KERN_PROC_PID) failed: {}",
            std::io::Error::last_os_error()
        )));
    }

    // The kernel answers an unknown pid with success and zero bytes.
    if size < P_FLAG_OFFSET + std::mem::size_of::<i32>() {
        return Err(query_failed(format!(
            "sysctl(KERN_PROC_PID) returned {size} bytes"
        )));
    }

    let p_flag = i32::from_ne_bytes([
        info.0[P_FLAG_OFFSET],
        info.0[P_FLAG_OFFSET + 1],
        info.0[P_FLAG_OFFSET + 2],
        info.0[P_FLAG_OFFSET + 3],
    ]);
    Ok(p_flag & P_TRACED != 0)
}
