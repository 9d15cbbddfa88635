//! Oro-specific aarch64 architecture facilities and types, built on top of the
//! architecture-agnostic traits and types defined in `orok-arch-base`.

mod thread;

pub use thread::ThreadState;

#[cfg(any(test, target_arch = "aarch64"))]
use crate::arch::{Tso, Unsupported, reg::TsoRegisters};

/// Implements the aarch64 architecture.
#[non_exhaustive]
pub struct Arch;

#[cfg(target_arch = "aarch64")]
impl orok_arch_base::Arch for Arch {
	type ThreadState = ThreadState;

	#[cold]
	unsafe fn init() {
		log_memory_model(&Tso::new(crate::arch::reg::Cpu));
	}
}

/// Logs which memory models the executing core can run under.
#[cfg(any(test, target_arch = "aarch64"))]
fn log_memory_model<R: TsoRegisters>(tso: &Tso<R>) {
	match tso.memory_model() {
		Ok(model) => log::info!("aarch64: TSO memory model available; core runs {model:?}"),
		Err(Unsupported) => log::info!("aarch64: TSO memory model unavailable"),
	}
}
