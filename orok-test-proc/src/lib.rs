#![cfg_attr(
	not(doc),
	expect(missing_docs, reason = "docs are enabled only under `doc` cfg")
)]
#![cfg_attr(doc, doc = include_str!("../README.md"))]

extern crate proc_macro;

mod effect;

use proc_macro::TokenStream;

/// Declares one or more effects on a function.
///
/// Effects are used for debugging in order to track side effects,
/// pre- and post-conditions, and other runtime behaviors via runtime
/// analysis implementations (namely during testing or local development).
///
/// ```ignore
/// #[effect(read_reg = actlr_el1, write_reg = actlr_el1)]
/// fn toggle() { /* ... */ }
/// ```
///
/// They have no effect on release builds unless explicitly enabled
/// via the `orok-test/emit` feature.
#[proc_macro_attribute]
pub fn effect(attr: TokenStream, input: TokenStream) -> TokenStream {
	match effect::effect(attr.into(), input.into()) {
		Ok(ts) => ts.into(),
		Err(err) => err.to_compile_error().into(),
	}
}
