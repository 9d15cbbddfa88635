//! Provides a high level abstraction over the main ID register (`MIDR_EL1`).

use orok_macro::bitstruct;

bitstruct! {
	/// The `MIDR_EL1` register.
	///
	/// Identifies the core's implementer and part. Read-only; the
	/// upper 32 bits are reserved.
	pub struct MidrEl1(u64) {
		/// The implementer code, assigned by Arm.
		pub implementer[31:24] => as u8,
		/// Implementation-defined variant number (major revision).
		pub variant[23:20] => as u8,
		/// Architecture code. `0xF` means "defined by the ID registers".
		pub architecture[19:16] => as u8,
		/// Implementation-defined primary part number.
		pub part_num[15:4] => as u16,
		/// Implementation-defined revision number (minor revision).
		pub revision[3:0] => as u8,
	}
}

impl MidrEl1 {
	/// Implementer code for Arm Limited.
	pub const IMPLEMENTER_ARM: u8 = 0x41;
	/// Implementer code for Apple Inc.
	pub const IMPLEMENTER_APPLE: u8 = 0x61;

	/// Returns whether the core was implemented by Apple.
	///
	/// Apple cores interpret several implementation-defined registers
	/// (`AIDR_EL1`, `ACTLR_EL1`) in vendor-specific ways.
	#[must_use]
	pub const fn is_apple(self) -> bool {
		self.implementer() == Self::IMPLEMENTER_APPLE
	}
}
