//! Tests for the procedural macros re-exported by this crate.
#![allow(clippy::missing_docs_in_private_items, clippy::unusual_byte_groupings)]

use crate::{bitstruct, blanket_trait};

bitstruct! {
	/// A register laid out like an ID register: a byte at the top
	/// and two flags at the bottom.
	pub struct TestReg(u64) {
		/// Vendor byte.
		pub vendor[31:24] => as u8,
		/// Nibble field.
		pub rev[3:0] => as u8,
		/// Low flag.
		pub lo[4] => as bool,
		/// High flag.
		pub hi[63] => as bool,
	}
}

bitstruct! {
	/// A 32-bit register.
	struct Narrow(u32) {
		/// A wide field that spans the middle of the register.
		part[15:4] => as u16,
	}
}

#[test]
fn bitstruct_reads_fields() {
	let reg = TestReg::from_raw(0x8000_0000_6100_001A);
	assert_eq!(reg.vendor(), 0x61);
	assert_eq!(reg.rev(), 0xA);
	assert!(reg.lo());
	assert!(reg.hi());
	assert_eq!(reg.raw(), 0x8000_0000_6100_001A);
}

#[test]
fn bitstruct_with_preserves_other_bits() {
	let reg = TestReg::from_raw(0x0000_0F00_0000_0000);

	let reg = reg.with_lo(true).with_vendor(0xFF);
	assert_eq!(reg.raw(), 0x0000_0F00_FF00_0010);

	let reg = reg.with_lo(false);
	assert_eq!(reg.raw(), 0x0000_0F00_FF00_0000);
}

#[test]
fn bitstruct_set_in_place() {
	let mut reg = TestReg::default();
	reg.set_hi(true).set_rev(3);
	assert_eq!(u64::from(reg), 0x8000_0000_0000_0003);

	reg.set_hi(false);
	assert_eq!(reg, TestReg::from(3));
}

#[test]
fn bitstruct_discards_excess_bits() {
	// `rev` is 4 bits wide; the upper nibble must not leak into `lo`.
	let reg = TestReg::default().with_rev(0xF7);
	assert_eq!(reg.rev(), 0x7);
	assert!(!reg.lo());
}

#[test]
fn bitstruct_narrow_repr() {
	let reg = Narrow::from_raw(0xFFFF_FFFF).with_part(0);
	assert_eq!(reg.raw(), 0xFFFF_000F);
	assert_eq!(Narrow::from_raw(0x0000_ABC0).part(), 0xABC);
}

trait Left {
	fn left(&self) -> u32;
}

trait Right {
	fn right(&self) -> u32;
}

#[blanket_trait]
trait Both: Left + Right {}

struct Pair;

impl Left for Pair {
	fn left(&self) -> u32 {
		1
	}
}

impl Right for Pair {
	fn right(&self) -> u32 {
		2
	}
}

fn sum(both: &impl Both) -> u32 {
	both.left() + both.right()
}

#[test]
fn blanket_trait_applies_to_implementors() {
	assert_eq!(sum(&Pair), 3);
}
