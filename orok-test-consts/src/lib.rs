#![cfg_attr(
	not(doc),
	expect(missing_docs, reason = "docs are enabled only under `doc` cfg")
)]
#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![cfg_attr(not(test), no_std)]

/// A block that should result in an effect being emitted is starting.
pub const EFFECT_START: u64 = 0x1;
/// A block that should result in an effect being emitted is ending.
pub const EFFECT_END: u64 = 0x2;

/// (aarch64) The effect block will read the `MIDR_EL1` identification register.
pub const AARCH64_EFFECT_READ_REG_MIDR_EL1: u64 = 0x200;
/// (aarch64) The effect block will read the `AIDR_EL1` auxiliary identification register.
pub const AARCH64_EFFECT_READ_REG_AIDR_EL1: u64 = 0x201;
/// (aarch64) The effect block will read the `ACTLR_EL1` auxiliary control register.
pub const AARCH64_EFFECT_READ_REG_ACTLR_EL1: u64 = 0x202;
/// (aarch64) The effect block will write the `ACTLR_EL1` auxiliary control register.
pub const AARCH64_EFFECT_WRITE_REG_ACTLR_EL1: u64 = 0x203;
