//! Provides the `bitstruct!{}` proc macro.
#![allow(
	clippy::missing_docs_in_private_items,
	reason = "parse tree nodes mirror the macro grammar"
)]

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
	Attribute, Ident, LitInt, Result, Token, Type, Visibility, bracketed, parenthesized,
	parse::{Parse, ParseStream},
	spanned::Spanned,
};

struct Bitstruct {
	attributes: Vec<Attribute>,
	vis:        Visibility,
	name:       Ident,
	repr:       Type,
	fields:     Vec<FieldDef>,
}

impl Parse for Bitstruct {
	fn parse(input: ParseStream<'_>) -> Result<Self> {
		let attributes = input.call(Attribute::parse_outer)?;
		let vis = input.parse()?;
		input.parse::<Token![struct]>()?;
		let name = input.parse()?;

		let repr_content;
		parenthesized!(repr_content in input);
		let repr = repr_content.parse()?;

		let body;
		syn::braced!(body in input);

		let mut fields = Vec::new();
		while !body.is_empty() {
			fields.push(body.parse()?);
			if body.is_empty() {
				break;
			}
			body.parse::<Token![,]>()?;
		}

		Ok(Self {
			attributes,
			vis,
			name,
			repr,
			fields,
		})
	}
}

/// `#[attrs] vis name[high(:low)?] => as Type`
struct FieldDef {
	attributes: Vec<Attribute>,
	vis:        Visibility,
	name:       Ident,
	range:      BitRange,
	ty:         Type,
}

impl Parse for FieldDef {
	fn parse(input: ParseStream<'_>) -> Result<Self> {
		let attributes = input.call(Attribute::parse_outer)?;
		let vis = input.parse()?;
		let name = input.parse()?;

		let range_content;
		bracketed!(range_content in input);
		let range = range_content.parse()?;

		input.parse::<Token![=>]>()?;
		input.parse::<Token![as]>()?;
		let ty = input.parse()?;

		Ok(Self {
			attributes,
			vis,
			name,
			range,
			ty,
		})
	}
}

struct BitRange {
	high: LitInt,
	low:  Option<LitInt>,
}

impl Parse for BitRange {
	fn parse(input: ParseStream<'_>) -> Result<Self> {
		let high = input.parse()?;
		let low = if input.parse::<Option<Token![:]>>()?.is_some() {
			Some(input.parse()?)
		} else {
			None
		};
		Ok(Self { high, low })
	}
}

impl BitRange {
	/// Returns the inclusive `(high, low)` bit positions.
	fn bounds(&self) -> Result<(u32, u32)> {
		let high = self.high.base10_parse::<u32>()?;
		let low = match &self.low {
			Some(low) => low.base10_parse::<u32>()?,
			None => high,
		};

		if high < low {
			return Err(syn::Error::new(
				self.high.span(),
				"high bit cannot be lower than low bit",
			));
		}

		Ok((high, low))
	}
}

/// Returns the bit width of an unsigned primitive type, if it is one.
fn unsigned_width(ty: &Type) -> Option<u32> {
	let Type::Path(p) = ty else {
		return None;
	};

	match p.path.get_ident()?.to_string().as_str() {
		"u8" => Some(8),
		"u16" => Some(16),
		"u32" => Some(32),
		"u64" => Some(64),
		"u128" => Some(128),
		_ => None,
	}
}

fn is_bool(ty: &Type) -> bool {
	matches!(ty, Type::Path(p) if p.path.is_ident("bool"))
}

/// Defines a register (or register-like) wrapper type around a primitive integer type.
pub fn bitstruct(input: TokenStream) -> Result<TokenStream> {
	let Bitstruct {
		attributes,
		vis,
		name,
		repr,
		fields,
	} = syn::parse2(input)?;

	let Some(repr_width) = unsigned_width(&repr) else {
		return Err(syn::Error::new_spanned(
			&repr,
			"bitstruct repr type must be an unsigned integer",
		));
	};

	let mut claimed: u128 = 0;
	let mut members = Vec::with_capacity(fields.len());

	for field in fields {
		let (high, low) = field.range.bounds()?;
		let count = high - low + 1;

		if high >= repr_width {
			return Err(syn::Error::new(
				field.range.high.span(),
				format!(
					"field '{}' high bit must be lower than the repr type width ({repr_width})",
					field.name
				),
			));
		}

		let field_mask = (u128::MAX >> (128 - count)) << low;
		if claimed & field_mask != 0 {
			return Err(syn::Error::new(
				field.name.span(),
				format!("bit field '{}' overlaps with a previous field", field.name),
			));
		}
		claimed |= field_mask;

		let FieldDef {
			attributes: attrs,
			vis: field_vis,
			name: get_name,
			ty,
			..
		} = field;
		let set_name = format_ident!("set_{}", get_name);
		let with_name = format_ident!("with_{}", get_name);
		let see = format!("See [`Self::{get_name}()`] for more information about this field.");

		if is_bool(&ty) {
			if count != 1 {
				return Err(syn::Error::new(
					ty.span(),
					format!("boolean bit field must be exactly 1 bit wide (field is {count} bits)"),
				));
			}

			members.push(quote! {
				#(#attrs)*
				#[must_use]
				#field_vis const fn #get_name(self) -> bool {
					((self.0 >> #low) & 1) != 0
				}

				#[doc = "Returns a copy with the bit field set."]
				#[doc = #see]
				#[must_use]
				#field_vis const fn #with_name(self, val: bool) -> Self {
					if val {
						Self(self.0 | (1 << #low))
					} else {
						Self(self.0 & !(1 << #low))
					}
				}

				#[doc = "Sets the bit field in place. Returns `self`."]
				#[doc = #see]
				#field_vis fn #set_name(&mut self, val: bool) -> &mut Self {
					*self = self.#with_name(val);
					self
				}
			});
			continue;
		}

		match unsigned_width(&ty) {
			Some(width) if width >= count => {}
			Some(_) => {
				return Err(syn::Error::new(
					ty.span(),
					format!("field type is too narrow for a {count}-bit field"),
				));
			}
			None => {
				return Err(syn::Error::new(
					ty.span(),
					"bit field type must be `bool` or an unsigned integer",
				));
			}
		}

		let low_mask = u128::MAX >> (128 - count);
		let low_mask = quote!((#low_mask as #repr));

		members.push(quote! {
			#(#attrs)*
			#[must_use]
			#field_vis const fn #get_name(self) -> #ty {
				((self.0 >> #low) & #low_mask) as #ty
			}

			#[doc = "Returns a copy with the bit field set. Excess high bits are discarded."]
			#[doc = #see]
			#[must_use]
			#field_vis const fn #with_name(self, val: #ty) -> Self {
				Self((self.0 & !(#low_mask << #low)) | (((val as #repr) & #low_mask) << #low))
			}

			#[doc = "Sets the bit field in place. Returns `self`."]
			#[doc = #see]
			#field_vis fn #set_name(&mut self, val: #ty) -> &mut Self {
				*self = self.#with_name(val);
				self
			}
		});
	}

	Ok(quote! {
		#(#attributes)*
		#[repr(transparent)]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
		#vis struct #name(#repr);

		#[automatically_derived]
		impl #name {
			/// Wraps a raw register value. All bits are retained.
			#[must_use]
			#vis const fn from_raw(value: #repr) -> Self {
				Self(value)
			}

			/// Returns the raw register value.
			#[must_use]
			#vis const fn raw(self) -> #repr {
				self.0
			}

			#(#members)*
		}

		#[automatically_derived]
		impl ::core::convert::From<#repr> for #name {
			fn from(value: #repr) -> Self {
				Self(value)
			}
		}

		#[automatically_derived]
		impl ::core::convert::From<#name> for #repr {
			fn from(value: #name) -> Self {
				value.0
			}
		}
	})
}
