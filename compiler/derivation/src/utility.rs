use syn::{parse::Parse, AttrStyle, Attribute, Error};

pub(crate) trait HelperAttribute: Parse {
    const NAME: &'static str;

    fn obtain(owner: &impl quote::ToTokens, attrs: &[Attribute]) -> syn::Result<Self> {
        let attr = attrs
            .iter()
            .find(|attr| attr.path().is_ident(Self::NAME) && matches!(attr.style, AttrStyle::Outer))
            .ok_or_else(|| {
                Error::new_spanned(
                    owner,
                    format!("missing helper attribute `#[{}]`", Self::NAME),
                )
            })?;

        attr.parse_args()
    }
}
