use proc_macro2::TokenStream;
use quote::quote;

/// Generate the Model and Shaped trait implementations
pub fn model_impl(model: &crate::model::description::ModelDescription) -> TokenStream {
    let name = model.name();
    let (impl_generics, ty_generics, where_clause) = model.generics().split_for_impl();
    let field_name_strs = model.field_name_strs();
    let field_keys = model.field_keys();
    let field_omit_empty = model.field_omit_empty();

    quote! {
        impl #impl_generics ::docmux::core::model::Model for #name #ty_generics #where_clause {
            const FIELDS: &'static [::docmux::core::retag::FieldTag] = &[
                #( ::docmux::core::retag::FieldTag::new(#field_name_strs, #field_keys, #field_omit_empty), )*
            ];
        }

        impl #impl_generics ::docmux::core::shape::Shaped for #name #ty_generics #where_clause {
            const SHAPE: ::docmux::core::shape::Shape = ::docmux::core::shape::Shape::Record;
        }
    }
}
