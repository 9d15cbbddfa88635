#![cfg_attr(
	not(doc),
	expect(missing_docs, reason = "docs are enabled only under `doc` cfg")
)]
#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![allow(
	clippy::single_call_fn,
	reason = "most macro entry points are single-call for code organization"
)]
#![allow(
	clippy::arithmetic_side_effects,
	clippy::integer_division,
	clippy::as_conversions,
	reason = "bit arithmetic is range checked before expansion"
)]
#![allow(
	clippy::needless_pass_by_value,
	reason = "consistent ownership semantics for proc macro inputs"
)]

extern crate proc_macro;

mod bitstruct;
mod blanket_trait;

use proc_macro::TokenStream;

/// Implements a blanket trait for all types `T` that
/// satisfy the trait bounds specified in the blanket trait definition.
///
/// ```ignore
/// use orok_macro::blanket_trait;
///
/// #[blanket_trait]
/// pub trait MyBlanketTrait: SomeBound + AnotherBound {}
/// ```
///
/// This generates the following:
///
/// ```ignore
/// impl<T: ?Sized> MyBlanketTrait for T where T: SomeBound + AnotherBound {}
/// ```
#[proc_macro_attribute]
pub fn blanket_trait(attr: TokenStream, input: TokenStream) -> TokenStream {
	match blanket_trait::blanket_trait(attr.into(), input.into()) {
		Ok(ts) => ts.into(),
		Err(err) => err.to_compile_error().into(),
	}
}

/// Defines a bit structure wrapper type around a primitive integer type,
/// along with a set of field accessors.
///
/// ```ignore
/// bitstruct! {
/// 	/// The `EXAMPLE_EL1` register.
/// 	pub struct ExampleEl1(u64) {
/// 		/// A single bit flag.
/// 		pub enable[0] => as bool,
/// 		/// A multi-bit field (bits 15 through 8, inclusive).
/// 		pub level[15:8] => as u8,
/// 	}
/// }
/// ```
///
/// Each field `foo` generates `foo()`, `with_foo()` and `set_foo()`.
/// The wrapper also gets `from_raw()`, `raw()` and `From` conversions
/// to and from the repr type. Bits not covered by a field are preserved
/// untouched by every setter.
#[proc_macro]
pub fn bitstruct(input: TokenStream) -> TokenStream {
	match bitstruct::bitstruct(input.into()) {
		Ok(ts) => ts.into(),
		Err(err) => err.to_compile_error().into(),
	}
}
