pub(crate) mod codec;
pub(crate) mod description;
pub(crate) mod model;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use description::ModelDescription;

pub fn derive_model_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let model = match ModelDescription::parse(&input) {
        Ok(model) => model,
        Err(e) => return e.into_compile_error().into(),
    };

    let model_impl = model::model_impl(&model);
    let encode_impl = codec::encode_impl(&model);
    let decode_impl = codec::decode_impl(&model);

    quote! {
        #model_impl
        #encode_impl
        #decode_impl
    }
    .into()
}
