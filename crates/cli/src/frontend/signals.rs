//! SIGINT handling for the duration of a run.

use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Raises `flag` on the first SIGINT and terminates the process on the
/// second. Handlers are removed when the value is dropped.
#[cfg(unix)]
pub(crate) struct InterruptGuard {
    ids: [signal_hook::SigId; 2],
}

#[cfg(unix)]
impl InterruptGuard {
    pub(crate) fn install(flag: &Arc<AtomicBool>) -> io::Result<Self> {
        use signal_hook::consts::SIGINT;
        use signal_hook::flag;

        // Registered first so it sees the flag before the second handler sets it.
        let terminate = flag::register_conditional_shutdown(SIGINT, 130, Arc::clone(flag))?;
        let raise = match flag::register(SIGINT, Arc::clone(flag)) {
            Ok(id) => id,
            Err(error) => {
                signal_hook::low_level::unregister(terminate);
                return Err(error);
            }
        };
        Ok(Self {
            ids: [terminate, raise],
        })
    }
}

#[cfg(unix)]
impl Drop for InterruptGuard {
    fn drop(&mut self) {
        for id in self.ids {
            signal_hook::low_level::unregister(id);
        }
    }
}

#[cfg(not(unix))]
pub(crate) struct InterruptGuard;

#[cfg(not(unix))]
impl InterruptGuard {
    pub(crate) fn install(_flag: &Arc<AtomicBool>) -> io::Result<Self> {
        Ok(Self)
    }
}
