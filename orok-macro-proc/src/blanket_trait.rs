//! Provides the `#[blanket_trait]` attribute macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ItemTrait, Result};

/// Emits the trait unchanged, followed by a blanket implementation
/// for every type satisfying its supertraits.
pub fn blanket_trait(attr: TokenStream, input: TokenStream) -> Result<TokenStream> {
	if !attr.is_empty() {
		return Err(syn::Error::new_spanned(
			attr,
			"#[blanket_trait] does not accept any arguments",
		));
	}

	let item: ItemTrait = syn::parse2(input)?;

	if !item.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&item.generics,
			"#[blanket_trait] does not support traits with generic parameters",
		));
	}

	if item.supertraits.is_empty() {
		return Err(syn::Error::new_spanned(
			&item.ident,
			"#[blanket_trait] requires at least one supertrait bound",
		));
	}

	// The generated impl has no body, so nothing may need implementing.
	if let Some(trait_item) = item.items.first() {
		return Err(syn::Error::new_spanned(
			trait_item,
			"#[blanket_trait] traits must not declare any items",
		));
	}

	if let Some(unsafety) = &item.unsafety {
		return Err(syn::Error::new_spanned(
			unsafety,
			"#[blanket_trait] cannot be applied to an `unsafe trait`",
		));
	}

	let ident = &item.ident;
	let supertraits = &item.supertraits;

	Ok(quote! {
		#item

		#[automatically_derived]
		impl<T: ?Sized> #ident for T where T: #supertraits {}
	})
}
