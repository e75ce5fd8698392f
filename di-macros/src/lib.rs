//! Compile-time dependency injection macros for ResearchBook.
//!
//! - `#[derive(Context)]` exposes each field of the application context
//! - `#[derive(FromContext)]` builds a repository or service out of a context
//!
//! Generated code references `crate::FromRef`, which the consuming crate
//! re-exports at its root.

use proc_macro::TokenStream;

mod context;
mod from_context;

/// Derive macro for the DI root.
///
/// Generates one `FromRef<Self>` implementation per field so the field's type
/// can be extracted from the context. Field types must be distinct and
/// `Clone`. Fields marked `#[context(skip)]` are not exposed.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub research_db: ResearchDb,
///     pub thesis_db: ThesisDb,
///     #[context(skip)]
///     pub started_at: Instant,
/// }
/// ```
#[proc_macro_derive(Context, attributes(context))]
pub fn derive_context(input: TokenStream) -> TokenStream {
    context::derive_context_impl(input)
}

/// Derive macro for types that are assembled from a context.
///
/// Each field is resolved with `FromRef::from_ref(ctx)`, unless it carries
/// `#[from_context(with = "path::to::fn")]`, in which case `fn(&ctx)` is
/// called instead. The context type defaults to `Context` and can be
/// overridden with `#[from_context(Context = "MyContext")]` on the struct.
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct ThesisRepository {
///     db: ThesisDb,
///     #[from_context(with = "Context::limits")]
///     limits: Limits,
/// }
/// ```
#[proc_macro_derive(FromContext, attributes(from_context))]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    from_context::derive_from_context_impl(input)
}
