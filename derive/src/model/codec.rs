use proc_macro2::TokenStream;
use quote::quote;

use crate::model::description::ModelDescription;

/// Generate the Encode implementation: one `encode_field` call per field, in declaration order
pub fn encode_impl(model: &ModelDescription) -> TokenStream {
    let name = model.name();
    let (impl_generics, ty_generics, where_clause) = model.generics().split_for_impl();
    let field_idents = model.field_idents();
    let field_indices = 0..field_idents.len();

    quote! {
        impl #impl_generics ::docmux::core::encode::Encode for #name #ty_generics #where_clause {
            #[allow(unused_mut, unused_variables)]
            fn encode(&self, _omit_empty: bool) -> ::std::option::Option<::docmux::bson::Bson> {
                let fields = <Self as ::docmux::core::model::Model>::FIELDS;
                let mut doc = ::docmux::bson::Document::new();
                #( ::docmux::core::model::encode_field(&mut doc, &fields[#field_indices], &self.#field_idents); )*
                ::std::option::Option::Some(::docmux::bson::Bson::Document(doc))
            }
        }
    }
}

/// Generate the Decode implementation: start from `Default` and overwrite every field present in the document
pub fn decode_impl(model: &ModelDescription) -> TokenStream {
    let name = model.name();
    let (impl_generics, ty_generics, where_clause) = model.generics().split_for_impl();
    let field_idents = model.field_idents();
    let field_indices = 0..field_idents.len();

    quote! {
        impl #impl_generics ::docmux::core::decode::Decode for #name #ty_generics #where_clause {
            #[allow(unused_mut, unused_variables)]
            fn decode(value: ::docmux::bson::Bson) -> ::std::result::Result<Self, ::docmux::core::error::MapError> {
                let fields = <Self as ::docmux::core::model::Model>::FIELDS;
                let mut doc = ::docmux::core::model::expect_document::<Self>(value)?;
                let mut out = <Self as ::std::default::Default>::default();
                #(
                    if let ::std::option::Option::Some(v) = ::docmux::core::model::decode_field(&mut doc, &fields[#field_indices])? {
                        out.#field_idents = v;
                    }
                )*
                ::std::result::Result::Ok(out)
            }
        }
    }
}
