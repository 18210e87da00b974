//! Attach denial.

use crate::error::AntiDebugError;
use crate::profile::BuildProfile;
use crate::sys;

/// Outcome of a deny-attach request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyAttach {
    /// The kernel accepted the directive, or had already applied it.
    Applied,
    /// Not attempted because `profile` keeps the process debuggable.
    Skipped { profile: BuildProfile },
}

impl DenyAttach {
    /// `true` when the kernel now refuses attachment.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Tells the kernel to refuse debugger attachment for the rest of this
/// process's life.
///
/// Does nothing in a [`BuildProfile::Debug`] build. In a release build the OS
/// request is the first thing issued. The result is never reported; failures
/// are only logged at `debug` level. A tracer that is already attached is not
/// detached.
#[inline(always)]
pub fn deny_debugger_attach() {
    if !BuildProfile::ACTIVE.denies_attach() {
        return;
    }
    if let Err(err) = sys::deny_attach() {
        tracing::debug!(
            code = err.code(),
            errno = err.raw_os_error(),
            error = %err,
            "deny-attach directive not applied"
        );
    }
}

/// [`deny_debugger_attach`] with the OS outcome surfaced.
pub fn try_deny_debugger_attach() -> Result<DenyAttach, AntiDebugError> {
    deny_debugger_attach_for(BuildProfile::ACTIVE)
}

/// Applies the deny-attach decision for an explicit `profile`.
pub fn deny_debugger_attach_for(profile: BuildProfile) -> Result<DenyAttach, AntiDebugError> {
    if !profile.denies_attach() {
        tracing::debug!(profile = %profile, "deny-attach skipped");
        return Ok(DenyAttach::Skipped { profile });
    }
    sys::deny_attach()?;
    Ok(DenyAttach::Applied)
}
