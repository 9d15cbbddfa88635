//! Per-thread total store order (TSO) memory model control.
//!
//! Some Apple cores can execute with the x86-style total store order
//! memory model instead of the (weaker) architectural default. The
//! switch is a single bit in `ACTLR_EL1`, which is core-global; it is made
//! to behave as a per-thread setting by saving and restoring it on every
//! context switch (see [`Tso::on_switch()`]).
//!
//! Support is never cached. Every operation probes the executing core
//! anew, since a thread may resume on a different (heterogeneous) core.

use crate::arch::reg::{ActlrEl1, TsoRegisters};

/// The executing core cannot switch to (or out of) the TSO memory model,
/// or refused to apply a requested change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the executing core does not support switching the memory model")]
pub struct Unsupported;

/// The memory models a thread can execute under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryModel {
	/// The architecture's default, weakly ordered memory model.
	#[default]
	Default,
	/// Total store order.
	Tso,
}

impl From<bool> for MemoryModel {
	#[inline]
	fn from(tso_enabled: bool) -> Self {
		if tso_enabled {
			Self::Tso
		} else {
			Self::Default
		}
	}
}

impl From<MemoryModel> for bool {
	#[inline]
	fn from(model: MemoryModel) -> Self {
		matches!(model, MemoryModel::Tso)
	}
}

/// The TSO mode persisted in a thread's control state while the thread is
/// not running.
///
/// Only written by [`Tso::on_switch()`] when the owning thread is switched
/// out, and only read by it when the thread is switched back in. New
/// threads either start out with the default memory model, copy their
/// parent's state, or are seeded from [`Tso::snapshot()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TsoThread {
	/// Whether the thread executes with TSO enabled.
	enabled: bool,
}

impl TsoThread {
	/// Creates a new persisted state with the given mode.
	#[inline]
	#[must_use]
	pub const fn new(enabled: bool) -> Self {
		Self { enabled }
	}

	/// Returns whether the thread executes with TSO enabled.
	#[inline]
	#[must_use]
	pub const fn enabled(self) -> bool {
		self.enabled
	}

	/// Returns the memory model the thread executes under.
	#[inline]
	#[must_use]
	pub const fn memory_model(self) -> MemoryModel {
		if self.enabled {
			MemoryModel::Tso
		} else {
			MemoryModel::Default
		}
	}
}

/// TSO memory model control for the executing core.
///
/// Holds no state of its own beyond the register access capability;
/// constructing one is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tso<R> {
	/// The register access capability.
	regs: R,
}

impl<R> Tso<R> {
	/// Creates a new control over the given registers.
	#[inline]
	#[must_use]
	pub const fn new(regs: R) -> Self {
		Self { regs }
	}

	/// Returns the underlying register access capability.
	#[inline]
	#[must_use]
	pub const fn regs(&self) -> &R {
		&self.regs
	}
}

impl<R: TsoRegisters> Tso<R> {
	/// Returns whether the executing core implements the TSO memory model.
	///
	/// True if and only if the core was implemented by Apple and advertises
	/// TSO in `AIDR_EL1`. Without the `tso` feature, always `false` and no
	/// registers are read.
	#[inline]
	#[must_use]
	pub fn supported(&self) -> bool {
		cfg!(feature = "tso") && self.regs.midr_el1().is_apple() && self.regs.aidr_el1().apple_tso()
	}

	/// Returns whether the executing core currently runs with TSO enabled.
	///
	/// Reads the live register each time.
	#[inline]
	pub fn current_mode(&self) -> Result<bool, Unsupported> {
		if !self.supported() {
			return Err(Unsupported);
		}

		Ok(self.regs.actlr_el1().apple_tsoen())
	}

	/// Returns the memory model the executing core currently runs under.
	#[inline]
	pub fn memory_model(&self) -> Result<MemoryModel, Unsupported> {
		self.current_mode().map(MemoryModel::from)
	}

	/// Enables or disables TSO on the executing core.
	///
	/// Fails without touching `ACTLR_EL1` if the core has no TSO support.
	/// Otherwise the bit is written and read back; if the core did not
	/// take the change, fails with [`Unsupported`] and leaves the register
	/// as the hardware left it.
	///
	/// The change applies to the whole core until the next context switch,
	/// at which point it is saved into the outgoing thread's state.
	pub fn set_mode(&self, enabled: bool) -> Result<(), Unsupported> {
		let result = self.apply(enabled);

		if result.is_err() {
			log::debug!("tso: core rejected memory model change (enable={enabled})");
		}

		result
	}

	/// Requests that the executing core run under the given memory model.
	///
	/// Cores without TSO support always run under the default model, so
	/// requesting [`MemoryModel::Default`] on them succeeds without any
	/// register access.
	pub fn request(&self, model: MemoryModel) -> Result<(), Unsupported> {
		if model == MemoryModel::Default && !self.supported() {
			return Ok(());
		}

		self.set_mode(model.into())
	}

	/// Captures the executing core's live mode as a persisted thread state.
	///
	/// On cores without TSO support, returns the default state.
	#[must_use]
	pub fn snapshot(&self) -> TsoThread {
		TsoThread::new(self.current_mode().unwrap_or(false))
	}

	/// Context switch hook.
	///
	/// Must be called by the scheduler while `outgoing` is still the thread
	/// executing on this core. Saves the live mode into `outgoing` and then
	/// applies `incoming`'s persisted mode. Failures are swallowed; the core
	/// keeps whatever mode it ends up in.
	///
	/// On cores without TSO support, this is a single capability check.
	#[inline]
	pub fn on_switch(&self, outgoing: &mut TsoThread, incoming: &TsoThread) {
		if !self.supported() {
			return;
		}

		if let Ok(enabled) = self.current_mode() {
			outgoing.enabled = enabled;
		}

		let _ = self.apply(incoming.enabled);
	}

	/// Writes the TSO enable bit and verifies the core accepted it.
	/// Never logs; called from the context switch path.
	#[inline]
	fn apply(&self, enabled: bool) -> Result<(), Unsupported> {
		if !self.supported() {
			return Err(Unsupported);
		}

		let actlr: ActlrEl1 = self.regs.actlr_el1().with_apple_tsoen(enabled);

		// SAFETY: Only TSOEN is changed; every other bit is written back as read.
		unsafe {
			self.regs.set_actlr_el1(actlr);
		}

		if self.current_mode()? == enabled {
			Ok(())
		} else {
			Err(Unsupported)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::arch::{
		reg::{AidrEl1, MidrEl1},
		sim::SimRegs,
	};

	fn apple() -> Tso<SimRegs> {
		Tso::new(SimRegs::apple_tso())
	}

	fn generic() -> Tso<SimRegs> {
		Tso::new(SimRegs::generic())
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn probe_requires_apple_and_tso_bit() {
		assert!(apple().supported());
		assert!(!generic().supported());

		let tso = apple();
		tso.regs().set_aidr(AidrEl1::from_raw(0));
		assert!(!tso.supported());

		let tso = generic();
		tso.regs().set_aidr(AidrEl1::from_raw(0).with_apple_tso(true));
		assert!(!tso.supported(), "the AIDR bit is meaningless on non-Apple cores");
	}

	#[test]
	fn probe_never_touches_actlr() {
		let tso = apple();
		let _ = tso.supported();
		let _ = generic().supported();
		assert_eq!(tso.regs().actlr_accesses(), 0);
	}

	#[test]
	fn unsupported_core_rejects_everything() {
		let tso = generic();
		assert_eq!(tso.current_mode(), Err(Unsupported));
		assert_eq!(tso.memory_model(), Err(Unsupported));
		assert_eq!(tso.set_mode(true), Err(Unsupported));
		assert_eq!(tso.set_mode(false), Err(Unsupported));
		assert_eq!(tso.request(MemoryModel::Tso), Err(Unsupported));
		assert_eq!(tso.regs().actlr_accesses(), 0);
		assert_eq!(tso.regs().actlr_writes(), 0);
	}

	#[test]
	fn unsupported_core_accepts_default_model() {
		let tso = generic();
		assert_eq!(tso.request(MemoryModel::Default), Ok(()));
		assert_eq!(tso.snapshot(), TsoThread::default());
		assert_eq!(tso.regs().actlr_accesses(), 0);
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn set_mode_is_read_back() {
		let tso = apple();
		assert_eq!(tso.current_mode(), Ok(false));

		assert_eq!(tso.set_mode(true), Ok(()));
		assert_eq!(tso.current_mode(), Ok(true));
		assert!(tso.regs().actlr().apple_tsoen());
		assert_eq!(tso.memory_model(), Ok(MemoryModel::Tso));

		assert_eq!(tso.set_mode(false), Ok(()));
		assert_eq!(tso.current_mode(), Ok(false));
		assert_eq!(tso.memory_model(), Ok(MemoryModel::Default));
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn set_mode_is_idempotent() {
		let tso = apple();
		assert_eq!(tso.set_mode(true), Ok(()));
		let once = tso.regs().actlr();
		assert_eq!(tso.set_mode(true), Ok(()));
		assert_eq!(tso.regs().actlr(), once);
		assert_eq!(tso.current_mode(), Ok(true));
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn set_mode_preserves_other_bits() {
		let tso = apple();
		tso.regs().set_actlr(ActlrEl1::from_raw(0xF0F0_0000_0000_00F0));

		assert_eq!(tso.set_mode(true), Ok(()));
		assert_eq!(tso.regs().actlr().raw(), 0xF0F0_0000_0000_00F2);

		assert_eq!(tso.set_mode(false), Ok(()));
		assert_eq!(tso.regs().actlr().raw(), 0xF0F0_0000_0000_00F0);
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn refused_change_is_unsupported() {
		let tso = apple();
		tso.regs().lock_tsoen();

		assert_eq!(tso.set_mode(true), Err(Unsupported));
		assert_eq!(tso.regs().actlr_writes(), 1);
		assert_eq!(tso.current_mode(), Ok(false));

		// Already in the requested mode; the write is a no-op and verifies.
		assert_eq!(tso.set_mode(false), Ok(()));
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn support_is_rechecked_on_every_call() {
		let tso = apple();
		assert_eq!(tso.set_mode(true), Ok(()));

		// Thread migrated to a core without the extension.
		tso.regs().set_midr(MidrEl1::from_raw(0x410F_D083));
		tso.regs().reset_counters();

		assert_eq!(tso.current_mode(), Err(Unsupported));
		assert_eq!(tso.set_mode(false), Err(Unsupported));
		assert_eq!(tso.regs().actlr_accesses(), 0);
		assert!(tso.regs().actlr().apple_tsoen());
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn snapshot_reflects_live_mode() {
		let tso = apple();
		assert_eq!(tso.snapshot(), TsoThread::new(false));
		assert_eq!(tso.set_mode(true), Ok(()));
		assert_eq!(tso.snapshot(), TsoThread::new(true));
		assert_eq!(tso.snapshot().memory_model(), MemoryModel::Tso);
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn request_maps_to_mode() {
		let tso = apple();
		assert_eq!(tso.request(MemoryModel::Tso), Ok(()));
		assert_eq!(tso.current_mode(), Ok(true));
		assert_eq!(tso.request(MemoryModel::Default), Ok(()));
		assert_eq!(tso.current_mode(), Ok(false));
	}

	#[test]
	fn memory_model_conversions() {
		assert_eq!(MemoryModel::from(true), MemoryModel::Tso);
		assert_eq!(MemoryModel::from(false), MemoryModel::Default);
		assert!(bool::from(MemoryModel::Tso));
		assert!(!bool::from(MemoryModel::Default));
		assert_eq!(MemoryModel::default(), MemoryModel::Default);
		assert_eq!(TsoThread::default().memory_model(), MemoryModel::Default);
	}

	#[test]
	fn switch_on_unsupported_core_is_inert() {
		let tso = generic();
		let mut a = TsoThread::new(true);
		let b = TsoThread::new(false);

		tso.on_switch(&mut a, &b);

		assert!(a.enabled());
		assert_eq!(tso.regs().actlr_accesses(), 0);
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn switch_scenario() {
		let tso = apple();
		tso.regs().set_actlr(ActlrEl1::from_raw(0).with_apple_tsoen(true));

		let mut a = TsoThread::new(true);
		let mut b = TsoThread::new(false);

		tso.on_switch(&mut a, &b);
		assert!(a.enabled());
		assert!(!tso.regs().actlr().apple_tsoen());

		tso.on_switch(&mut b, &a);
		assert!(!b.enabled());
		assert!(tso.regs().actlr().apple_tsoen());

		assert_eq!(tso.regs().actlr_writes(), 2);
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn switch_saves_mode_changed_while_running() {
		let tso = apple();
		let mut a = TsoThread::new(false);
		let mut b = TsoThread::new(false);

		// A enables TSO for itself while running.
		assert_eq!(tso.set_mode(true), Ok(()));

		tso.on_switch(&mut a, &b);
		assert!(a.enabled());
		assert_eq!(tso.current_mode(), Ok(false));

		tso.on_switch(&mut b, &a);
		assert!(!b.enabled());
		assert_eq!(tso.current_mode(), Ok(true));
	}

	#[test]
	#[cfg_attr(not(feature = "tso"), ignore = "requires the `tso` feature")]
	fn switch_swallows_refused_change() {
		let tso = apple();
		tso.regs().lock_tsoen();

		let mut a = TsoThread::new(true);
		let b = TsoThread::new(true);

		tso.on_switch(&mut a, &b);

		// The live mode (off) was saved; the refused restore is ignored.
		assert!(!a.enabled());
		assert_eq!(tso.current_mode(), Ok(false));
	}
}
