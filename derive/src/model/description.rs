use docmux_core::retag::{Annotation, OMIT_EMPTY, TAG_NAMESPACE};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Fields, Generics, Ident, LitStr, Token};

/// Encapsulates all the parsed information about a record type and provides clean accessors
pub struct ModelDescription {
    name: Ident,
    generics: Generics,
    fields: Vec<FieldDescription>,
}

pub struct FieldDescription {
    pub ident: Ident,
    /// Document key
    pub key: String,
    pub omit_empty: bool,
}

impl ModelDescription {
    /// Parse a DeriveInput and create a ModelDescription
    pub fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let name = input.ident.clone();

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => fields.named.clone(),
                fields => return Err(syn::Error::new_spanned(fields, "Only named fields are supported")),
            },
            _ => return Err(syn::Error::new_spanned(&name, "Only structs are supported")),
        };

        let fields = fields.into_iter().map(FieldDescription::parse).collect::<syn::Result<Vec<_>>>()?;
        Ok(Self { name, generics: input.generics.clone(), fields })
    }

    pub fn name(&self) -> &Ident { &self.name }
    pub fn generics(&self) -> &Generics { &self.generics }

    pub fn field_idents(&self) -> Vec<&Ident> { self.fields.iter().map(|f| &f.ident).collect() }
    pub fn field_name_strs(&self) -> Vec<String> { self.fields.iter().map(|f| f.ident.to_string().trim_start_matches("r#").to_owned()).collect() }
    pub fn field_keys(&self) -> Vec<&str> { self.fields.iter().map(|f| f.key.as_str()).collect() }
    pub fn field_omit_empty(&self) -> Vec<bool> { self.fields.iter().map(|f| f.omit_empty).collect() }
}

impl FieldDescription {
    fn parse(field: syn::Field) -> syn::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| syn::Error::new_spanned(&field, "Only named fields are supported"))?;

        let mut annotation = Annotation::default();
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(TAG_NAMESPACE)) {
            let parts = attr.parse_args_with(Punctuated::<AnnotationPart, Token![,]>::parse_terminated)?;
            for part in parts {
                match part {
                    AnnotationPart::Text(text) => {
                        let parsed = Annotation::parse(&text.value());
                        if parsed.name.is_some() {
                            if annotation.name.is_some() {
                                return Err(syn::Error::new_spanned(text, "field is renamed more than once"));
                            }
                            annotation.name = parsed.name;
                        }
                        annotation.omit_empty |= parsed.omit_empty;
                    }
                    AnnotationPart::Flag(flag) if flag == OMIT_EMPTY => annotation.omit_empty = true,
                    AnnotationPart::Flag(flag) => {
                        return Err(syn::Error::new_spanned(&flag, format!("unknown {} option `{}`", TAG_NAMESPACE, flag)));
                    }
                }
            }
        }

        let (key, omit_empty) = annotation.resolve(&ident.to_string());
        Ok(Self { ident, key, omit_empty })
    }
}

/// One comma-separated element of a `#[docmux(...)]` annotation
enum AnnotationPart {
    Text(LitStr),
    Flag(Ident),
}

impl Parse for AnnotationPart {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            Ok(AnnotationPart::Text(input.parse()?))
        } else {
            Ok(AnnotationPart::Flag(input.parse()?))
        }
    }
}
