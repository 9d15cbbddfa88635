//! Register wrappers and the register access capability used by the
//! memory model control.
//!
//! Code that needs the system registers is generic over the capability
//! traits in this module rather than issuing `mrs`/`msr` directly, so
//! that it can be driven by [`Cpu`] on real hardware and by a simulated
//! register file everywhere else.

mod actlr_el1;
mod aidr_el1;
mod midr_el1;

pub use self::{actlr_el1::ActlrEl1, aidr_el1::AidrEl1, midr_el1::MidrEl1};

/// Read access to the identification registers of the executing core.
pub trait IdRegisters {
	/// Reads `MIDR_EL1`.
	fn midr_el1(&self) -> MidrEl1;

	/// Reads `AIDR_EL1`.
	fn aidr_el1(&self) -> AidrEl1;
}

/// Access to the auxiliary control register (`ACTLR_EL1`) of the executing core.
///
/// # Safety
/// Implementations must access the register of the core executing the call,
/// and nothing else. Writes must take effect before the write returns
/// (i.e. the implementation must synchronize the context).
pub unsafe trait AuxControl {
	/// Reads `ACTLR_EL1`.
	fn actlr_el1(&self) -> ActlrEl1;

	/// Writes `ACTLR_EL1`.
	///
	/// # Safety
	/// The register is implementation defined. Callers must only change
	/// bits they understand, writing every other bit back as it was read.
	unsafe fn set_actlr_el1(&self, value: ActlrEl1);
}

/// Every register the memory model control touches.
#[orok_macro::blanket_trait]
pub trait TsoRegisters: IdRegisters + AuxControl {}

/// The executing core's system registers.
///
/// Only implements the capability traits when compiling for aarch64.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cpu;

#[cfg(target_arch = "aarch64")]
impl IdRegisters for Cpu {
	#[expect(clippy::inline_always, reason = "single instruction register access")]
	#[inline(always)]
	#[orok_test::effect(read_reg = midr_el1)]
	fn midr_el1(&self) -> MidrEl1 {
		let r: u64;
		// SAFETY: Reading MIDR_EL1 has no side effects and is always permitted at EL1.
		unsafe {
			core::arch::asm!("mrs {}, MIDR_EL1", out(reg) r, options(nostack, nomem, preserves_flags));
		}
		MidrEl1::from_raw(r)
	}

	#[expect(clippy::inline_always, reason = "single instruction register access")]
	#[inline(always)]
	#[orok_test::effect(read_reg = aidr_el1)]
	fn aidr_el1(&self) -> AidrEl1 {
		let r: u64;
		// SAFETY: Reading AIDR_EL1 has no side effects and is always permitted at EL1.
		unsafe {
			core::arch::asm!("mrs {}, AIDR_EL1", out(reg) r, options(nostack, nomem, preserves_flags));
		}
		AidrEl1::from_raw(r)
	}
}

#[cfg(target_arch = "aarch64")]
// SAFETY: `mrs`/`msr` only ever address the executing core's register,
// SAFETY: and the write is followed by an `isb`.
unsafe impl AuxControl for Cpu {
	#[expect(clippy::inline_always, reason = "single instruction register access")]
	#[inline(always)]
	#[orok_test::effect(read_reg = actlr_el1)]
	fn actlr_el1(&self) -> ActlrEl1 {
		let r: u64;
		// SAFETY: Reading ACTLR_EL1 has no side effects.
		unsafe {
			core::arch::asm!("mrs {}, ACTLR_EL1", out(reg) r, options(nostack, nomem, preserves_flags));
		}
		ActlrEl1::from_raw(r)
	}

	#[expect(clippy::inline_always, reason = "single instruction register access")]
	#[inline(always)]
	#[orok_test::effect(write_reg = actlr_el1)]
	unsafe fn set_actlr_el1(&self, value: ActlrEl1) {
		// SAFETY: Caller upholds the bit-preservation contract. Not marked `nomem`;
		// SAFETY: the write changes how surrounding memory accesses are ordered.
		unsafe {
			core::arch::asm!(
				"msr ACTLR_EL1, {}",
				"isb",
				in(reg) value.raw(),
				options(nostack, preserves_flags),
			);
		}
	}
}
