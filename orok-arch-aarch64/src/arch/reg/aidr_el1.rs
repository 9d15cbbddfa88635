//! Provides a high level abstraction over the auxiliary ID register (`AIDR_EL1`).
//!
//! The register's contents are entirely implementation defined; fields
//! here are only meaningful for the implementer named in their docs.

use orok_macro::bitstruct;

bitstruct! {
	/// The `AIDR_EL1` register.
	pub struct AidrEl1(u64) {
		/// (Apple) When `true`, the core implements the total store order
		/// memory model, selectable via [`super::ActlrEl1::apple_tsoen()`].
		pub apple_tso[9] => as bool,
	}
}
