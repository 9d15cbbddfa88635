#![cfg_attr(
	not(doc),
	expect(missing_docs, reason = "docs are enabled only under `doc` cfg")
)]
#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "emit", not(feature = "mmio")))]
compile_error!("'emit' feature enabled without any emission backend");

#[doc(inline)]
pub use orok_test_consts as consts;
mod macros;
mod window;
pub use orok_test_proc::*;
pub use window::set_vmm_base;
#[cfg(feature = "mmio")]
pub use window::{WINDOW_PHYS, window};
