//! Location of the test harness's event window.
//!
//! Events are emitted as eight consecutive `u64` writes into an MMIO
//! window provided by the harness's emulated test device. Under the
//! kernel, that window is only reachable through the linear map, so its
//! address is the device's physical offset plus the current linear map
//! base.

#[cfg(feature = "mmio")]
use core::sync::atomic::{AtomicU64, Ordering};

/// Physical offset of the event window on the QEMU `virt` machine.
#[cfg(feature = "mmio")]
pub const WINDOW_PHYS: u64 = 0x090D_0000;

/// The current base offset for the linear map.
#[cfg(feature = "mmio")]
static VMM_BASE: AtomicU64 = AtomicU64::new(0);

/// Sets the base offset for the linear map.
///
/// All future emissions will target `base + WINDOW_PHYS`. This must be
/// called whenever the linear mapping is reconstructed (e.g. when the
/// bootloader switches to the kernel). Without the `mmio` feature, this
/// is a no-op.
///
/// # Safety
/// Caller must ensure that the event window is mapped, writable, and
/// device memory at the resulting address.
#[cfg_attr(not(feature = "mmio"), inline(always))]
#[cfg_attr(
	not(feature = "mmio"),
	expect(
		unused_variables,
		reason = "base is only used when the 'mmio' feature is enabled"
	)
)]
pub unsafe fn set_vmm_base(base: u64) {
	#[cfg(feature = "mmio")]
	{
		VMM_BASE.store(base, Ordering::SeqCst);
	}
}

/// Returns a pointer to the event window's eight registers.
#[cfg(feature = "mmio")]
#[doc(hidden)]
#[must_use]
pub fn window() -> *mut [u64; 8] {
	#[expect(
		clippy::as_conversions,
		reason = "the window address is a plain integer until it is dereferenced"
	)]
	let addr = (VMM_BASE.load(Ordering::SeqCst) + WINDOW_PHYS) as usize;
	core::ptr::with_exposed_provenance_mut(addr)
}
