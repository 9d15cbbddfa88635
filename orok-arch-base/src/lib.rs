#![cfg_attr(
	not(doc),
	expect(missing_docs, reason = "docs are enabled only under `doc` cfg")
)]
#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![cfg_attr(not(test), no_std)]

use core::fmt::Debug;

/// An architecture. All associated types must be specified.
pub trait Arch {
	/// See [`ThreadState`].
	type ThreadState: ThreadState;

	/// Initializes the architecture on the bootstrap core.
	///
	/// # Safety
	/// - Must be called exactly once during the kernel's early initialization.
	/// - Must only be called on the bootstrap CPU.
	/// - Must be called before any other architecture-specific functions.
	///
	/// # Panics
	/// This function is free to panic if the architecture cannot be initialized
	/// for any reason. There is no expectation that logging is enabled; this is
	/// an early failure; Oro simply cannot boot on the given hardware if it does.
	unsafe fn init();
}

/// Architecture-specific state carried by every thread, which the
/// scheduler hands to the architecture around each context switch.
///
/// Some per-core hardware state (e.g. memory ordering controls) is only
/// meaningful per thread. The architecture keeps such state here and
/// saves/restores it in [`ThreadState::switch`], which makes the
/// core-global hardware appear thread-local.
///
/// New threads receive a copy of their creator's state (via [`Clone`]);
/// [`Default`] is the state of a thread created from nothing.
pub trait ThreadState: Sized + Send + Clone + Default + Debug + 'static {
	/// Called by the scheduler immediately before the core stops executing
	/// the thread owning `self` and starts executing the thread owning `next`.
	///
	/// Implementations must be infallible, must not block, and must run in
	/// bounded time; this is called on every context switch.
	///
	/// # Safety
	/// - Must be called on the core that is executing the thread owning `self`,
	///   while that thread is still the execution context.
	/// - Interrupts (or any other asynchronous events) must be disabled, and
	///   no other switch may be in progress on this core.
	/// - `next` must not currently be executing on any core.
	unsafe fn switch(&mut self, next: &Self);
}
