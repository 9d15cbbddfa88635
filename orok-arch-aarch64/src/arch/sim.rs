//! A simulated register file, for driving register-dependent code on
//! the host.
//!
//! Every register access through the capability traits is counted, so tests
//! can assert not only on the resulting state but also on whether (and how
//! often) a register was touched. Setters and peeks on [`SimRegs`] itself
//! model external influences and are not counted.

use orok_type::{RelaxedU64, RelaxedUsize};

use crate::arch::reg::{ActlrEl1, AidrEl1, AuxControl, IdRegisters, MidrEl1};

/// `MIDR_EL1` of an Apple M1 efficiency core.
const MIDR_APPLE_ICESTORM: u64 = 0x611F_0221;
/// `MIDR_EL1` of an Arm Cortex-A72.
const MIDR_CORTEX_A72: u64 = 0x410F_D083;

/// Simulated `MIDR_EL1`, `AIDR_EL1` and `ACTLR_EL1` of a single core.
#[derive(Debug)]
pub struct SimRegs {
	/// `MIDR_EL1`.
	midr:         RelaxedU64,
	/// `AIDR_EL1`.
	aidr:         RelaxedU64,
	/// `ACTLR_EL1`.
	actlr:        RelaxedU64,
	/// The `ACTLR_EL1` bits that take writes. Others keep their value.
	actlr_mask:   RelaxedU64,
	/// Number of reads of either ID register.
	id_reads:     RelaxedUsize,
	/// Number of reads of `ACTLR_EL1`.
	actlr_reads:  RelaxedUsize,
	/// Number of writes to `ACTLR_EL1`.
	actlr_writes: RelaxedUsize,
}

impl SimRegs {
	/// Creates a register file with the given initial values.
	///
	/// All bits of `ACTLR_EL1` accept writes.
	#[must_use]
	pub const fn new(midr: MidrEl1, aidr: AidrEl1, actlr: ActlrEl1) -> Self {
		Self {
			midr:         RelaxedU64::new(midr.raw()),
			aidr:         RelaxedU64::new(aidr.raw()),
			actlr:        RelaxedU64::new(actlr.raw()),
			actlr_mask:   RelaxedU64::new(u64::MAX),
			id_reads:     RelaxedUsize::new(0),
			actlr_reads:  RelaxedUsize::new(0),
			actlr_writes: RelaxedUsize::new(0),
		}
	}

	/// An Apple core that implements TSO, currently disabled.
	#[must_use]
	pub const fn apple_tso() -> Self {
		Self::new(
			MidrEl1::from_raw(MIDR_APPLE_ICESTORM),
			AidrEl1::from_raw(0).with_apple_tso(true),
			ActlrEl1::from_raw(0),
		)
	}

	/// A non-Apple core. TSO is not implemented.
	#[must_use]
	pub const fn generic() -> Self {
		Self::new(
			MidrEl1::from_raw(MIDR_CORTEX_A72),
			AidrEl1::from_raw(0),
			ActlrEl1::from_raw(0),
		)
	}

	/// Replaces `MIDR_EL1`, e.g. to model migrating to another core.
	pub fn set_midr(&self, midr: MidrEl1) {
		self.midr.store(midr.raw());
	}

	/// Replaces `AIDR_EL1`.
	pub fn set_aidr(&self, aidr: AidrEl1) {
		self.aidr.store(aidr.raw());
	}

	/// Replaces `ACTLR_EL1`, bypassing the write mask.
	pub fn set_actlr(&self, actlr: ActlrEl1) {
		self.actlr.store(actlr.raw());
	}

	/// Returns `ACTLR_EL1` without counting an access.
	#[must_use]
	pub fn actlr(&self) -> ActlrEl1 {
		ActlrEl1::from_raw(self.actlr.load())
	}

	/// Sets which `ACTLR_EL1` bits take writes.
	pub fn set_actlr_write_mask(&self, mask: u64) {
		self.actlr_mask.store(mask);
	}

	/// Makes the core silently ignore writes to the TSO enable bit.
	pub fn lock_tsoen(&self) {
		let tsoen = ActlrEl1::from_raw(0).with_apple_tsoen(true).raw();
		self.set_actlr_write_mask(self.actlr_mask.load() & !tsoen);
	}

	/// Number of reads of `MIDR_EL1` and `AIDR_EL1`.
	#[must_use]
	pub fn id_reads(&self) -> usize {
		self.id_reads.load()
	}

	/// Number of reads of `ACTLR_EL1`.
	#[must_use]
	pub fn actlr_reads(&self) -> usize {
		self.actlr_reads.load()
	}

	/// Number of writes to `ACTLR_EL1`.
	#[must_use]
	pub fn actlr_writes(&self) -> usize {
		self.actlr_writes.load()
	}

	/// Number of reads and writes of `ACTLR_EL1`.
	#[must_use]
	pub fn actlr_accesses(&self) -> usize {
		self.actlr_reads().wrapping_add(self.actlr_writes())
	}

	/// Zeroes all access counters.
	pub fn reset_counters(&self) {
		self.id_reads.store(0);
		self.actlr_reads.store(0);
		self.actlr_writes.store(0);
	}
}

impl Default for SimRegs {
	fn default() -> Self {
		Self::generic()
	}
}

impl IdRegisters for SimRegs {
	fn midr_el1(&self) -> MidrEl1 {
		self.id_reads.increment();
		MidrEl1::from_raw(self.midr.load())
	}

	fn aidr_el1(&self) -> AidrEl1 {
		self.id_reads.increment();
		AidrEl1::from_raw(self.aidr.load())
	}
}

// SAFETY: A `SimRegs` models exactly one core; there is no other register to touch.
unsafe impl AuxControl for SimRegs {
	fn actlr_el1(&self) -> ActlrEl1 {
		self.actlr_reads.increment();
		self.actlr()
	}

	unsafe fn set_actlr_el1(&self, value: ActlrEl1) {
		self.actlr_writes.increment();
		let mask = self.actlr_mask.load();
		self.actlr.store((self.actlr.load() & !mask) | (value.raw() & mask));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_accesses() {
		let regs = SimRegs::apple_tso();
		let _ = regs.midr_el1();
		let _ = regs.aidr_el1();
		let actlr = regs.actlr_el1();
		// SAFETY: Simulated register.
		unsafe {
			regs.set_actlr_el1(actlr.with_apple_tsoen(true));
		}

		assert_eq!(regs.id_reads(), 2);
		assert_eq!(regs.actlr_reads(), 1);
		assert_eq!(regs.actlr_writes(), 1);
		assert_eq!(regs.actlr_accesses(), 2);

		// Peeks are free.
		assert!(regs.actlr().apple_tsoen());
		assert_eq!(regs.actlr_accesses(), 2);

		regs.reset_counters();
		assert_eq!(regs.id_reads(), 0);
		assert_eq!(regs.actlr_accesses(), 0);
	}

	#[test]
	fn write_mask_drops_locked_bits() {
		let regs = SimRegs::apple_tso();
		regs.set_actlr(ActlrEl1::from_raw(0x10));
		regs.lock_tsoen();

		// SAFETY: Simulated register.
		unsafe {
			regs.set_actlr_el1(ActlrEl1::from_raw(0x0F));
		}

		assert_eq!(regs.actlr().raw(), 0x0D);
		assert!(!regs.actlr().apple_tsoen());
	}

	#[test]
	fn presets() {
		let apple = SimRegs::apple_tso();
		assert!(apple.midr_el1().is_apple());
		assert!(apple.aidr_el1().apple_tso());

		let generic = SimRegs::default();
		assert_eq!(generic.midr_el1().implementer(), MidrEl1::IMPLEMENTER_ARM);
		assert!(!generic.aidr_el1().apple_tso());
	}
}
