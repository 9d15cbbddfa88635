//! Provides a high level abstraction over the auxiliary control register (`ACTLR_EL1`).
//!
//! The register's contents are entirely implementation defined; fields
//! here are only meaningful for the implementer named in their docs.
//! Bits not described here must be written back exactly as they were read.

use orok_macro::bitstruct;

bitstruct! {
	/// The `ACTLR_EL1` register.
	pub struct ActlrEl1(u64) {
		/// (Apple) TSO enable. When `true`, the core executes with the total
		/// store order memory model; otherwise, with the architecture's
		/// default (weaker) memory model.
		///
		/// Only implemented if [`super::AidrEl1::apple_tso()`] is set. The bit is
		/// core-local and not preserved across power cycles.
		pub apple_tsoen[1] => as bool,
	}
}
