//! Per-thread aarch64 state.

use crate::arch::{Tso, TsoThread, reg::TsoRegisters};

/// The aarch64-specific state of a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadState {
	/// The thread's persisted memory model.
	tso: TsoThread,
}

impl ThreadState {
	/// Creates a new thread state with the given persisted memory model.
	#[inline]
	#[must_use]
	pub const fn new(tso: TsoThread) -> Self {
		Self { tso }
	}

	/// Returns the thread's persisted memory model.
	///
	/// Only up to date while the thread is not running.
	#[inline]
	#[must_use]
	pub const fn tso(&self) -> TsoThread {
		self.tso
	}

	/// Saves the live per-thread hardware state into `self` and loads
	/// `next`'s, using the given registers.
	#[inline]
	pub fn switch_with<R: TsoRegisters>(&mut self, next: &Self, tso: &Tso<R>) {
		tso.on_switch(&mut self.tso, &next.tso);
	}
}

#[cfg(target_arch = "aarch64")]
impl orok_arch_base::ThreadState for ThreadState {
	#[inline]
	unsafe fn switch(&mut self, next: &Self) {
		self.switch_with(next, &Tso::new(crate::arch::reg::Cpu));
	}
}
