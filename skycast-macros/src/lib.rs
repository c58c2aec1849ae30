//! Procedural macros for skycast
//!
//! `#[derive(Action)]` implements `skycast::store::Action` for an enum of
//! application actions. With `#[action(infer_categories)]` the category of each
//! variant is inferred from its PascalCase prefix, so `SearchSubmit` and
//! `SearchDidLoad` both land in `"search"`.

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Infer categories from variant name prefixes
    #[darling(default)]
    infer_categories: bool,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: Ident,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Keep this variant uncategorized
    #[darling(default)]
    skip_category: bool,
}

/// Verbs that end the category prefix of a variant name
const ACTION_VERBS: &[&str] = &[
    "Change", "Submit", "Cancel", "Load", "Error", "Retry", "Toggle", "Resize", "Show", "Hide",
    "Clear", "Set", "Focus", "Open", "Close",
];

fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn to_snake_case(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Infer a category from a variant name.
///
/// The prefix runs up to the first `Did` marker or action verb. Names that
/// start with a verb, or contain neither, stay uncategorized.
fn infer_category(name: &str) -> Option<String> {
    let parts = split_pascal_case(name);
    if parts.len() < 2 || ACTION_VERBS.contains(&parts[0].as_str()) {
        return None;
    }

    let end = parts
        .iter()
        .skip(1)
        .position(|p| p == "Did" || ACTION_VERBS.contains(&p.as_str()))
        .map(|i| i + 1)?;

    Some(to_snake_case(&parts[..end]))
}

/// Derive macro for the `Action` trait
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(infer_categories)]
/// enum Action {
///     SearchSubmit,
///     SearchDidLoad { generation: u64 },
///     Tick,
/// }
///
/// assert_eq!(Action::SearchSubmit.name(), "SearchSubmit");
/// assert_eq!(Action::Tick.category(), None);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.write_errors().into(),
    }
}

fn expand(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let opts = ActionOpts::from_derive_input(input)?;
    let name = &opts.ident;
    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        darling::ast::Data::Struct(_) => {
            return Err(darling::Error::custom("Action can only be derived for enums")
                .with_span(&input.ident));
        }
    };

    let name_arms = variants.iter().map(|v| name_arm(name, &v.ident));
    let category_arms = variants
        .iter()
        .map(|v| category_arm(name, v, opts.infer_categories));

    Ok(quote! {
        impl ::skycast::store::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms,)*
                }
            }

            fn category(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#category_arms,)*
                }
            }
        }
    })
}

fn name_arm(name: &Ident, variant: &Ident) -> TokenStream2 {
    let label = variant.to_string();
    quote! { #name::#variant { .. } => #label }
}

fn category_arm(name: &Ident, variant: &ActionVariant, infer: bool) -> TokenStream2 {
    let ident = &variant.ident;
    let category = if variant.skip_category {
        None
    } else if let Some(explicit) = &variant.category {
        Some(explicit.clone())
    } else if infer {
        infer_category(&ident.to_string())
    } else {
        None
    };

    match category {
        Some(c) => quote! { #name::#ident { .. } => ::core::option::Option::Some(#c) },
        None => quote! { #name::#ident { .. } => ::core::option::Option::None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_pascal_case() {
        assert_eq!(
            split_pascal_case("SearchDidLoad"),
            vec!["Search", "Did", "Load"]
        );
        assert_eq!(split_pascal_case("Tick"), vec!["Tick"]);
    }

    #[test]
    fn infers_prefix_before_did() {
        assert_eq!(infer_category("SearchDidLoad").as_deref(), Some("search"));
        assert_eq!(infer_category("SearchDidError").as_deref(), Some("search"));
    }

    #[test]
    fn infers_prefix_before_verb() {
        assert_eq!(infer_category("SearchSubmit").as_deref(), Some("search"));
        assert_eq!(
            infer_category("SearchInputChange").as_deref(),
            Some("search_input")
        );
        assert_eq!(infer_category("UiResize").as_deref(), Some("ui"));
    }

    #[test]
    fn leading_verb_or_single_word_is_uncategorized() {
        assert_eq!(infer_category("Tick"), None);
        assert_eq!(infer_category("FocusToggle"), None);
        assert_eq!(infer_category("ScreenNothing"), None);
    }

    #[test]
    fn expands_name_and_category_arms() {
        let input: DeriveInput = syn::parse_quote! {
            #[action(infer_categories)]
            enum Action {
                SearchSubmit,
                #[action(category = "error")]
                ErrorRetry,
                Tick,
            }
        };
        let tokens: String = expand(&input)
            .unwrap()
            .to_string()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert!(tokens.contains("Action::SearchSubmit{..}=>\"SearchSubmit\""));
        assert!(tokens.contains("Some(\"search\")"));
        assert!(tokens.contains("Some(\"error\")"));
        assert!(tokens.contains("Action::Tick{..}=>::core::option::Option::None"));
    }

    #[test]
    fn rejects_structs() {
        let input: DeriveInput = syn::parse_quote! {
            struct NotAnEnum;
        };
        assert!(expand(&input).is_err());
    }
}
