//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates binding attributes from structs and
//! their fields during macro expansion.

use syn::{Attribute, DeriveInput, Field, LitStr, Meta};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Environment variable name override.
    ///
    /// If `None`, the field name is converted to UPPER_SNAKE_CASE.
    pub name: Option<String>,

    /// Element separator pattern for collection fields.
    pub separator: Option<String>,

    /// Declare the collection without element type information.
    pub raw: bool,

    /// Upper bounds of a wildcard element type.
    ///
    /// `Some(vec![])` declares a wildcard without bounds.
    pub wildcard: Option<Vec<String>>,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Returns `Ok(None)` when the field carries no `#[env]` attribute and
    /// therefore is not bound.
    pub fn from_field(field: &Field) -> syn::Result<Option<Self>> {
        let mut attrs = None;

        for attr in env_attrs(&field.attrs) {
            let parsed = attrs.get_or_insert_with(Self::default);

            // Bare #[env]
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let name: LitStr = meta.value()?.parse()?;
                    parsed.name = Some(name.value());
                    return Ok(());
                }

                // separator = "..."
                if meta.path.is_ident("separator") {
                    let separator: LitStr = meta.value()?.parse()?;
                    parsed.separator = Some(separator.value());
                    return Ok(());
                }

                // raw
                if meta.path.is_ident("raw") {
                    parsed.raw = true;
                    return Ok(());
                }

                // wildcard = "Bound + Bound"
                if meta.path.is_ident("wildcard") {
                    let bounds: LitStr = meta.value()?.parse()?;
                    parsed.wildcard = Some(parse_bounds(&bounds.value()));
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

/// What `construct_empty` generates.
#[derive(Debug, Default)]
pub enum Constructor {
    /// `Default::default()`
    #[default]
    Default,
    /// A user supplied zero-argument function
    Path(syn::Path),
    /// No zero-argument constructor
    None,
}

/// Parsed `#[env(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Prefix prepended to every environment variable name.
    pub prefix: String,

    pub constructor: Constructor,
}

impl ContainerAttrs {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();
        let mut constructor_set = false;

        for attr in env_attrs(&input.attrs) {
            attr.parse_nested_meta(|meta| {
                // prefix = "..."
                if meta.path.is_ident("prefix") {
                    let prefix: LitStr = meta.value()?.parse()?;
                    attrs.prefix = prefix.value();
                    return Ok(());
                }

                // constructor = "path::to::fn"
                if meta.path.is_ident("constructor") {
                    let path: LitStr = meta.value()?.parse()?;
                    if constructor_set {
                        return Err(meta.error("constructor is already specified"));
                    }
                    attrs.constructor = Constructor::Path(path.parse()?);
                    constructor_set = true;
                    return Ok(());
                }

                // no_constructor
                if meta.path.is_ident("no_constructor") {
                    if constructor_set {
                        return Err(meta.error("constructor is already specified"));
                    }
                    attrs.constructor = Constructor::None;
                    constructor_set = true;
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(attrs)
    }
}

fn env_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("env"))
}

fn parse_bounds(bounds: &str) -> Vec<String> {
    bounds
        .split('+')
        .map(str::trim)
        .filter(|bound| !bound.is_empty())
        .map(str::to_string)
        .collect()
}
