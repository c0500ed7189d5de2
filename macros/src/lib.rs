//! Proc macros for graft: `descriptor!` declarative tree construction.
//!
//! This crate is not meant to be used directly — enable the `macros` feature on `graft`.

use proc_macro::TokenStream;

mod descriptor_macro;

/// Declarative descriptor tree construction.
///
/// Expands into [`Descriptor::build`] with one nested builder closure per block.
///
/// # Syntax
///
/// - `tag` — a node with no properties
/// - `tag(name)` — a bare identifier becomes a symbol `name` property
/// - `tag("Recent Files")` / `tag({expr})` — any other expression is the name value
/// - `tag(name, key = expr, ...)` — extra properties; values are Rust expressions
/// - `tag { ... }` — children, optionally separated by `;` or `,`
/// - `merge_point` / `merge_point(N)` — inside a block, register a merge point
///   (unlimited, or accepting at most `N > 0` children)
///
/// Keywords are accepted as tags (`type { ... }`).
///
/// # Example
///
/// ```ignore
/// let gui = descriptor! {
///     gui {
///         menu_bar {
///             menu(file, text = "&File") {
///                 action(open)
///                 merge_point
///                 separator
///                 action(quit)
///             }
///         }
///     }
/// };
/// ```
///
/// [`Descriptor::build`]: https://docs.rs/graft/latest/graft/struct.Descriptor.html#method.build
#[proc_macro]
pub fn descriptor(input: TokenStream) -> TokenStream {
    descriptor_macro::descriptor_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
