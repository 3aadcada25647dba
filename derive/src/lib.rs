mod model;

use proc_macro::TokenStream;

/// Derive the field tag table and the document encode/decode visitors for a struct.
///
/// Fields accept a `#[docmux(...)]` annotation: `#[docmux("name,omitempty")]`,
/// `#[docmux("name", omitempty)]` or `#[docmux(omitempty)]`. The struct must implement `Default`.
#[proc_macro_derive(Model, attributes(docmux))]
pub fn derive_model(input: TokenStream) -> TokenStream { model::derive_model_impl(input) }
