//! descriptor! macro: parse nested tag blocks and generate graft builder code.

use proc_macro2::{Literal, Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{braced, parenthesized, Error, Expr, Ident, LitInt, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A parsed argument inside `tag(...)`.
pub(crate) enum Arg {
    /// `key = expr`
    Property { key: Ident, value: Expr },
    /// A bare identifier, used as a symbol name.
    Symbol(Ident),
    /// Any other expression, used as the name value.
    Name(Expr),
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Property { key, .. } => write!(f, "Property({key})"),
            Arg::Symbol(ident) => write!(f, "Symbol({ident})"),
            Arg::Name(_) => f.write_str("Name(..)"),
        }
    }
}

/// A parsed node: `tag`, `tag(args)`, `tag { ... }` or `tag(args) { ... }`.
#[derive(Debug)]
pub(crate) struct Node {
    pub tag: Ident,
    pub args: Vec<Arg>,
    /// `None` when the node has no block.
    pub children: Option<Vec<Item>>,
}

/// An entry of a block.
#[derive(Debug)]
pub(crate) enum Item {
    Node(Node),
    /// `merge_point` or `merge_point(N)`.
    MergePoint(Option<usize>),
}

/// The top-level descriptor! input: exactly one root node.
#[derive(Debug)]
struct DescriptorInput {
    root: Node,
}

/// Block keyword that registers a merge point instead of adding a child.
const MERGE_POINT: &str = "merge_point";

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for DescriptorInput {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::new(
                Span::call_site(),
                "descriptor! macro requires a root node",
            ));
        }
        let root = parse_node(input)?;
        let _ = input.parse::<Option<Token![;]>>()?;
        if !input.is_empty() {
            return Err(input.error("descriptor! macro takes exactly one root node"));
        }
        Ok(DescriptorInput { root })
    }
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(Ident::peek_any) && input.peek2(Token![=]) && !input.peek2(Token![==]) {
            let key = input.call(Ident::parse_any)?;
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;
            return Ok(Arg::Property { key, value });
        }
        let expr: Expr = input.parse()?;
        if let Expr::Path(path) = &expr {
            if path.qself.is_none() && path.attrs.is_empty() {
                if let Some(ident) = path.path.get_ident() {
                    return Ok(Arg::Symbol(ident.clone()));
                }
            }
        }
        Ok(Arg::Name(expr))
    }
}

/// Parse a single node with its optional arguments and block.
pub(crate) fn parse_node(input: ParseStream) -> Result<Node> {
    let tag = input.call(Ident::parse_any)?;
    if tag == MERGE_POINT {
        return Err(Error::new(
            tag.span(),
            "`merge_point` is only allowed inside a block",
        ));
    }

    let mut args = Vec::new();
    if input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in input);
        let parsed = Punctuated::<Arg, Token![,]>::parse_terminated(&content)?;
        args = parsed.into_iter().collect();
        let positional = args
            .iter()
            .filter(|a| !matches!(a, Arg::Property { .. }))
            .count();
        if positional > 1 {
            return Err(Error::new(
                tag.span(),
                format!("`{tag}` takes at most one positional argument (its name)"),
            ));
        }
    }

    let children = if input.peek(syn::token::Brace) {
        let content;
        braced!(content in input);
        Some(parse_items(&content)?)
    } else {
        None
    };

    Ok(Node {
        tag,
        args,
        children,
    })
}

/// Parse block items until the block is exhausted.
fn parse_items(input: ParseStream) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    while !input.is_empty() {
        if input.peek(Ident::peek_any) && input.fork().call(Ident::parse_any)? == MERGE_POINT {
            items.push(Item::MergePoint(parse_merge_point(input)?));
        } else {
            items.push(Item::Node(parse_node(input)?));
        }
        if input.peek(Token![;]) {
            input.parse::<Token![;]>()?;
        } else if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
    }
    Ok(items)
}

/// Parse `merge_point` or `merge_point(N)` with `N > 0`.
fn parse_merge_point(input: ParseStream) -> Result<Option<usize>> {
    input.call(Ident::parse_any)?;
    if !input.peek(syn::token::Paren) {
        return Ok(None);
    }
    let content;
    parenthesized!(content in input);
    let lit: LitInt = content.parse()?;
    let count: usize = lit.base10_parse()?;
    if count == 0 {
        return Err(Error::new(
            lit.span(),
            "merge point budget must be greater than zero",
        ));
    }
    Ok(Some(count))
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Generate the property map expression for a node's arguments.
fn generate_properties(args: &[Arg]) -> TokenStream {
    if args.is_empty() {
        return quote! { () };
    }

    let mut inserts = Vec::new();
    let mut name = None;
    for arg in args {
        match arg {
            Arg::Property { key, value } => {
                let key = key.unraw().to_string();
                inserts.push(quote! { __props.insert(#key, #value); });
            }
            Arg::Symbol(ident) => {
                let text = ident.unraw().to_string();
                name = Some(quote! { ::graft::Symbol::from(#text) });
            }
            Arg::Name(expr) => {
                name = Some(quote! { #expr });
            }
        }
    }
    // The positional name wins over a `name = ...` property.
    if let Some(name) = name {
        inserts.push(quote! {
            __props.insert(::graft::NAME_KEY, ::graft::IntoName::into_name(#name));
        });
    }

    quote! {
        {
            let mut __props = ::graft::Properties::new();
            #(#inserts)*
            __props
        }
    }
}

/// Generate the builder closure for a block.
fn generate_block(items: &[Item]) -> TokenStream {
    let statements = items.iter().map(generate_item);
    quote! {
        |__builder: &mut ::graft::Builder<'_>| {
            #(#statements)*
        }
    }
}

/// Generate the builder call for one block item.
fn generate_item(item: &Item) -> TokenStream {
    match item {
        Item::MergePoint(None) => quote! { __builder.merge_point(); },
        Item::MergePoint(Some(count)) => {
            let count = Literal::usize_unsuffixed(*count);
            quote! {
                __builder.merge_point_capped(
                    ::core::num::NonZeroUsize::new(#count)
                        .expect("merge point budget checked at expansion"),
                );
            }
        }
        Item::Node(node) => {
            let tag = node.tag.unraw().to_string();
            let props = generate_properties(&node.args);
            match &node.children {
                None => quote! { __builder.node(#tag, #props); },
                Some(items) => {
                    let block = generate_block(items);
                    quote! { __builder.node_with(#tag, #props, #block); }
                }
            }
        }
    }
}

/// Entry point: generate code for the entire descriptor! macro.
pub(crate) fn descriptor_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: DescriptorInput = syn::parse2(input)?;
    let root = &parsed.root;

    let tag = root.tag.unraw().to_string();
    let props = generate_properties(&root.args);
    let block = generate_block(root.children.as_deref().unwrap_or_default());

    Ok(quote! {
        ::graft::Descriptor::build(#tag, #props, #block)
    })
}

// ===========================================================================
// Tests
// ===========================================================================
