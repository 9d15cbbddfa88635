use proc_macro2::TokenStream;
use quote::quote;
use syn::{
	Ident, ItemFn, Result, Token,
	parse::{Parse, ParseStream, Parser},
	punctuated::Punctuated,
};

/// The effect kinds understood by `orok_test::emit_effect!`.
const KNOWN_KINDS: &[&str] = &["read_reg", "write_reg"];

/// A single `kind = target` effect annotation.
struct Annotation {
	kind:   Ident,
	_eq:    Token![=],
	target: Ident,
}

impl Parse for Annotation {
	fn parse(input: ParseStream<'_>) -> Result<Self> {
		let kind: Ident = input.parse()?;
		if !KNOWN_KINDS.iter().any(|k| kind == *k) {
			return Err(syn::Error::new(
				kind.span(),
				format!(
					"unknown effect kind `{kind}`; expected one of: {}",
					KNOWN_KINDS.join(", ")
				),
			));
		}

		Ok(Self {
			kind,
			_eq: input.parse()?,
			target: input.parse()?,
		})
	}
}

pub fn effect(attr: TokenStream, input: TokenStream) -> Result<TokenStream> {
	let annotations = Punctuated::<Annotation, Token![,]>::parse_terminated.parse2(attr)?;
	if annotations.is_empty() {
		return Err(syn::Error::new(
			proc_macro2::Span::call_site(),
			"#[effect] requires at least one `kind = target` annotation",
		));
	}

	let fn_item: ItemFn = syn::parse2(input)?;
	let fn_name = fn_item.sig.ident.to_string();

	let attrs = &fn_item.attrs;
	let vis = &fn_item.vis;
	let sig = &fn_item.sig;
	let block = &fn_item.block;

	let starts = annotations.iter().map(|Annotation { kind, target, .. }| {
		quote! {
			::orok_test::annotate_effect_fn! {
				start @ #fn_name => { #kind = #target }
			}
		}
	});

	let ends = annotations.iter().map(|Annotation { kind, target, .. }| {
		quote! {
			::orok_test::annotate_effect_fn! {
				end @ #fn_name => { #kind = #target }
			}
		}
	});

	Ok(quote! {
		#(#attrs)*
		#vis #sig {
			#(#starts)*

			let return_result__effect__ = #block;

			#(#ends)*

			return_result__effect__
		}
	})
}
