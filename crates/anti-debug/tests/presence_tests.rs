use anti_debug::{current_pid, is_debugger_attached, parse_tracer_pid, process_trace_status};

#[test]
fn parse_tracer_pid_extracts_numeric_value() {
    let status = "Name:\ttest\nState:\tR (running)\nTracerPid:\t42\n";
    assert_eq!(parse_tracer_pid(status), Some(42));
    assert_eq!(parse_tracer_pid("TracerPid:\t0\n"), Some(0));
}

#[test]
fn parse_tracer_pid_returns_none_when_field_missing_or_invalid() {
    assert_eq!(parse_tracer_pid("Name:\ttest\nState:\tR\n"), None);
    assert_eq!(parse_tracer_pid("TracerPid:\tinvalid\n"), None);
    assert_eq!(parse_tracer_pid("TracerPid:\n"), None);
}

#[test]
fn untraced_process_is_not_reported_as_debugged() {
    assert!(!is_debugger_attached());
}

#[test]
fn query_for_missing_process_fails_or_reports_untraced() {
    match process_trace_status(u32::MAX) {
        Ok(traced) => assert!(!traced),
        Err(err) => assert!(matches!(
            err.code(),
            "process_query_failed" | "unsupported_platform"
        )),
    }
}

#[test]
fn repeated_and_concurrent_checks_agree() {
    let pid = current_pid();
    let before = process_trace_status(pid);

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| (0..50).map(|_| is_debugger_attached()).any(|hit| hit)))
        .collect();
    for handle in handles {
        assert!(!handle.join().expect("checker thread"));
    }

    assert_eq!(process_trace_status(pid), before);
    assert_eq!(current_pid(), pid);
}

#[cfg(target_os = "linux")]
mod traced_child {
    use anti_debug::process_trace_status;
    use std::os::unix::process::CommandExt;
    use std::process::{Child, Command};

    // Child that stops at exec with this process as its tracer.
    fn spawn_traced_sleep() -> Option<Child> {
        let mut command = Command::new("sleep");
        command.arg("30");
        // SAFETY: the hook only issues a single raw syscall between fork and exec.
        unsafe {
            command.pre_exec(|| {
                let rc = libc::ptrace(
                    libc::PTRACE_TRACEME,
                    0 as libc::pid_t,
                    std::ptr::null_mut::<libc::c_void>(),
                    std::ptr::null_mut::<libc::c_void>(),
                );
                if rc == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
        match command.spawn() {
            Ok(child) => Some(child),
            Err(err) => {
                eprintln!("skipping traced child scenario: {err}");
                None
            }
        }
    }

    fn wait_for_exec_stop(pid: libc::pid_t) -> bool {
        let mut status = 0;
        // SAFETY: `status` is a valid out pointer.
        let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
        rc == pid && libc::WIFSTOPPED(status)
    }

    fn detach(pid: libc::pid_t) -> bool {
        // SAFETY: this thread is the tracer of `pid`, which is in a ptrace stop.
        let rc = unsafe {
            libc::ptrace(
                libc::PTRACE_DETACH,
                pid,
                std::ptr::null_mut::<libc::c_void>(),
                std::ptr::null_mut::<libc::c_void>(),
            )
        };
        rc == 0
    }

    #[test]
    fn trace_status_follows_attach_and_detach() {
        let Some(mut child) = spawn_traced_sleep() else {
            return;
        };
        let pid = child.id();
        let raw_pid = pid as libc::pid_t;

        assert!(wait_for_exec_stop(raw_pid), "child did not stop at exec");
        assert_eq!(process_trace_status(pid), Ok(true));

        assert!(detach(raw_pid), "PTRACE_DETACH failed");
        assert_eq!(process_trace_status(pid), Ok(false));

        let _ = child.kill();
        let _ = child.wait();
    }
}
