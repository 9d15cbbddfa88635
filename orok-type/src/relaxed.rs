//! Relaxed atomic wrappers.
//!
//! These are for values that are shared across execution contexts but
//! carry no ordering obligations of their own (counters, simulated
//! hardware state, statistics). Anything that publishes other memory
//! must use a real atomic with an explicit ordering instead.

use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering::Relaxed};

#[doc(hidden)]
macro_rules! impl_relaxed {
	($ident:ident, $atomic:ty, $inner:ty) => {
		#[doc = concat!("A relaxed atomic `", stringify!($inner), "`.")]
		#[derive(Debug, Default)]
		#[repr(transparent)]
		pub struct $ident($atomic);

		impl $ident {
			/// Creates a new relaxed atomic with the given value.
			#[inline]
			#[must_use]
			pub const fn new(value: $inner) -> Self {
				Self(<$atomic>::new(value))
			}

			/// Loads the current value.
			#[inline]
			#[must_use]
			pub fn load(&self) -> $inner {
				self.0.load(Relaxed)
			}

			/// Stores a new value.
			#[inline]
			pub fn store(&self, value: $inner) {
				self.0.store(value, Relaxed);
			}
		}
	};

	($ident:ident, $atomic:ty, $inner:ty, counter) => {
		impl_relaxed!($ident, $atomic, $inner);

		impl $ident {
			/// Increments the value by one (wrapping), returning the previous value.
			#[inline]
			pub fn increment(&self) -> $inner {
				self.0.fetch_add(1, Relaxed)
			}
		}
	};
}

impl_relaxed!(RelaxedU64, AtomicU64, u64);
impl_relaxed!(RelaxedUsize, AtomicUsize, usize, counter);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn store_then_load() {
		let v = RelaxedU64::new(0x61);
		assert_eq!(v.load(), 0x61);
		v.store(0);
		assert_eq!(v.load(), 0);
		assert_eq!(RelaxedU64::default().load(), 0);
	}

	#[test]
	fn counter_increments() {
		let c = RelaxedUsize::new(usize::MAX);
		assert_eq!(c.increment(), usize::MAX);
		assert_eq!(c.load(), 0);
		assert_eq!(c.increment(), 0);
		assert_eq!(c.load(), 1);
	}
}
