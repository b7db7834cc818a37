//! Scoped critical sections
//!
//! The only synchronisation primitive on the device is the global interrupt
//! enable. Entering a section saves the current enable state and disables
//! interrupts; leaving it restores the saved state, so sections nest and the
//! helpers are safe to call with interrupts already off.

use core::marker::PhantomData;

/// Global interrupt enable of the platform.
///
/// # Safety
///
/// Between `acquire` and the matching `release` no other context that can
/// reach the same data may run: no interrupt handler, no other thread, no
/// other core. [`CriticalSection`] hands out a `bare_metal::CriticalSection`
/// token on the strength of this, and that token unlocks every
/// `bare_metal::Mutex` in the program.
///
/// A mask that does nothing does not qualify, so implementing the trait
/// takes an `unsafe impl`:
///
/// ```compile_fail,E0200
/// use spi_pwm_slave::InterruptMask;
///
/// struct Nothing;
///
/// impl InterruptMask for Nothing {
///     type State = ();
///
///     fn acquire(&self) {}
///
///     fn release(&self, _: ()) {}
/// }
/// ```
pub unsafe trait InterruptMask {
    /// Enable state captured on entry.
    type State: Copy;

    /// Save the current enable state, then disable interrupts.
    fn acquire(&self) -> Self::State;

    /// Put back exactly the state returned by the matching `acquire`.
    fn release(&self, state: Self::State);
}

/// Interrupts stay disabled for the lifetime of this guard.
pub struct CriticalSection<'a, M: InterruptMask> {
    mask: &'a M,
    saved: M::State,
    token: bare_metal::CriticalSection,
    /* Restoring on another context would corrupt its enable state */
    _not_send: PhantomData<*const ()>,
}

impl<'a, M: InterruptMask> CriticalSection<'a, M> {
    pub fn enter(mask: &'a M) -> Self {
        let saved = mask.acquire();

        CriticalSection {
            mask,
            saved,
            /* Interrupts are off from here until drop, as InterruptMask promises */
            token: unsafe { bare_metal::CriticalSection::new() },
            _not_send: PhantomData,
        }
    }

    /// Token for borrowing `bare_metal::Mutex` data while the section lasts.
    pub fn token(&self) -> &bare_metal::CriticalSection {
        &self.token
    }
}

impl<'a, M: InterruptMask> Drop for CriticalSection<'a, M> {
    fn drop(&mut self) {
        self.mask.release(self.saved);
    }
}

/// Run `f` with interrupts disabled.
pub fn free<M, F, R>(mask: &M, f: F) -> R
where
    M: InterruptMask,
    F: FnOnce(&bare_metal::CriticalSection) -> R,
{
    let section = CriticalSection::enter(mask);
    f(section.token())
}
