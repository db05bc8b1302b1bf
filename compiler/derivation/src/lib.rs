//! Custom derives used across the compiler.

use proc_macro::TokenStream;

mod str;
mod utility;

/// Derive an associated function `name` mapping each variant of the given enum
/// to its textual representation.
///
/// The letter case of the representation has to be specified via the helper
/// attribute `#[format(CASE)]`. Currently, the only option is `dash_case`.
///
/// # Examples
///
/// ```no_run
/// use derivation::Str;
///
/// #[derive(Str)]
/// #[format(dash_case)]
/// pub enum Kind {
///     Module,
///     TypeAlias { binder: u32 },
/// }
/// ```
///
/// Roughly the following code will be derived from the code above:
///
/// ```ignore
/// impl Kind {
///     pub const fn name(&self) -> &'static str {
///         match self {
///             Self::Module => "module",
///             Self::TypeAlias { .. } => "type-alias",
///         }
///     }
/// }
/// ```
#[proc_macro_derive(Str, attributes(format))]
pub fn derive_str(input: TokenStream) -> TokenStream {
    str::derive(input).unwrap_or_else(|error| error.into_compile_error().into())
}
