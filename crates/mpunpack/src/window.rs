//! Scoped decode windows.
//!
//! Every call into the decode engine runs inside a [`Window`]. Opening the
//! window tells the installed [`WindowHooks`] that raw views into session or
//! caller memory are about to be held; dropping it tells them the views are
//! gone. The drop runs on every exit path (completion, incomplete input, a
//! parse error, or a panic unwinding out of the engine), so a host that pauses
//! a relocating collector in `enter` always gets to resume it in `leave`
//! before any error reaches the caller.
//!
//! Plain Rust callers need none of this: the borrow checker already pins the
//! memory for the duration of the call, and the default [`NoHooks`] does
//! nothing. Hooks exist for embedders that build values inside a managed
//! runtime.

/// Which memory a decode window reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// The unpacker's own growable buffer.
    Session,
    /// A buffer owned and retained by the caller.
    Caller,
}

/// Host callbacks bracketing every decode call.
///
/// `leave` is called exactly once for every `enter`, with the same
/// [`Backing`], and restores whatever state `enter` changed.
pub trait WindowHooks {
    fn enter(&mut self, backing: Backing);
    fn leave(&mut self, backing: Backing);
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl WindowHooks for NoHooks {
    #[inline]
    fn enter(&mut self, _backing: Backing) {}

    #[inline]
    fn leave(&mut self, _backing: Backing) {}
}

/// Guard for one decode call. Hooks are left on drop.
pub(crate) struct Window<'h> {
    hooks: &'h mut dyn WindowHooks,
    backing: Backing,
}

impl<'h> Window<'h> {
    pub(crate) fn open(hooks: &'h mut dyn WindowHooks, backing: Backing) -> Self {
        hooks.enter(backing);
        tracing::trace!(?backing, "decode window opened");
        Self { hooks, backing }
    }
}

impl Drop for Window<'_> {
    fn drop(&mut self) {
        self.hooks.leave(self.backing);
        tracing::trace!(backing = ?self.backing, "decode window closed");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// Records every hook call into a shared log.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct RecordingHooks {
        pub(crate) log: Rc<RefCell<Vec<(&'static str, Backing)>>>,
    }

    impl WindowHooks for RecordingHooks {
        fn enter(&mut self, backing: Backing) {
            self.log.borrow_mut().push(("enter", backing));
        }

        fn leave(&mut self, backing: Backing) {
            self.log.borrow_mut().push(("leave", backing));
        }
    }

    #[test]
    fn leave_runs_when_scope_ends() {
        let mut hooks = RecordingHooks::default();
        let log = hooks.log.clone();
        {
            let _window = Window::open(&mut hooks, Backing::Caller);
            assert_eq!(log.borrow().as_slice(), &[("enter", Backing::Caller)]);
        }
        assert_eq!(
            log.borrow().as_slice(),
            &[("enter", Backing::Caller), ("leave", Backing::Caller)]
        );
    }

    #[test]
    fn leave_runs_while_unwinding() {
        let mut hooks = RecordingHooks::default();
        let log = hooks.log.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _window = Window::open(&mut hooks, Backing::Session);
            panic!("value construction failed");
        }));
        assert!(result.is_err());
        assert_eq!(
            log.borrow().as_slice(),
            &[("enter", Backing::Session), ("leave", Backing::Session)]
        );
    }
}
