use crate::utility::HelperAttribute;
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Nothing, Parse, ParseStream},
    Error, Fields, Ident,
};

pub(crate) fn derive(input: TokenStream) -> Result<TokenStream, Error> {
    let input: syn::ItemEnum = syn::parse(input)?;
    let type_ = input.ident;
    let visibility = input.vis;

    let FormatAttribute { letter_case } = HelperAttribute::obtain(&type_, &input.attrs)?;

    let mut mapping = Vec::with_capacity(input.variants.len());

    for variant in input.variants {
        let fields = match variant.fields {
            Fields::Named(_) => quote! { { .. } },
            Fields::Unnamed(_) => quote! { (..) },
            Fields::Unit => quote! {},
        };

        let name = &variant.ident;
        let representation = letter_case.transform(name);

        mapping.push(quote! { Self::#name #fields => #representation });
    }

    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let scrutinee = if mapping.is_empty() {
        // `Self` is an uninhabited type and to be able to generate an exhaustive
        // match expression, we need to dereference the receiver.
        quote! { *self }
    } else {
        quote! { self }
    };

    Ok(quote! {
        impl #impl_generics #type_ #type_generics #where_clause {
            #visibility const fn name(&self) -> &'static ::core::primitive::str {
                match #scrutinee { #( #mapping ),* }
            }
        }
    }
    .into())
}

struct FormatAttribute {
    letter_case: LetterCase,
}

impl HelperAttribute for FormatAttribute {
    const NAME: &'static str = "format";
}

impl Parse for FormatAttribute {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let letter_case = input.parse()?;
        let _: Nothing = input.parse()?;

        Ok(Self { letter_case })
    }
}

#[derive(Clone, Copy)]
enum LetterCase {
    DashCase,
}

impl LetterCase {
    const fn name(self) -> &'static str {
        match self {
            Self::DashCase => "dash_case",
        }
    }

    fn transform(self, ident: &Ident) -> String {
        match self {
            Self::DashCase => heck::AsKebabCase(ident.to_string()).to_string(),
        }
    }
}

impl Parse for LetterCase {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let ident: Ident = input.parse()?;

        if ident == Self::DashCase.name() {
            Ok(Self::DashCase)
        } else {
            Err(Error::new_spanned(&ident, "invalid letter case"))
        }
    }
}
