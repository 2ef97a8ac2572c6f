//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

mod attrs;

use attrs::{Constructor, ContainerAttrs, FieldAttrs};

/// Last path segment of a type, e.g. `Vec` for `std::vec::Vec<T>`
fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        _ => None,
    }
}

/// First type argument of a generic type, e.g. `T` for `Option<T>`
fn first_type_argument(segment: &syn::PathSegment) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        })
    } else {
        None
    }
}

/// Strip `Option<T>` to `T`
fn unwrap_option(ty: &Type) -> &Type {
    match last_segment(ty) {
        Some(seg) if seg.ident == "Option" => first_type_argument(seg).unwrap_or(ty),
        _ => ty,
    }
}

/// Name passed to `DeclaredType::class_named`
fn type_name(ty: &Type) -> String {
    match last_segment(ty) {
        Some(seg) => seg.ident.to_string(),
        None => quote!(#ty).to_string(),
    }
}

/// Collection shape tokens for `Vec<T>` and `IndexSet<T>`, with the element type
fn collection_shape(ty: &Type) -> Option<(TokenStream2, Option<&Type>)> {
    let seg = last_segment(ty)?;
    let shape = if seg.ident == "Vec" {
        quote!(::envbind::CollectionShape::Sequence)
    } else if seg.ident == "IndexSet" {
        quote!(::envbind::CollectionShape::UniqueSet)
    } else {
        return None;
    };
    Some((shape, first_type_argument(seg)))
}

/// Build the `DeclaredType` expression for a field
fn declared_type(field: &syn::Field, attrs: &FieldAttrs) -> syn::Result<TokenStream2> {
    let ty = unwrap_option(&field.ty);

    let Some((shape, element)) = collection_shape(ty) else {
        if attrs.raw || attrs.wildcard.is_some() {
            return Err(syn::Error::new_spanned(
                &field.ident,
                "`raw` and `wildcard` are only supported on Vec<T> and IndexSet<T> fields",
            ));
        }
        let name = type_name(ty);
        return Ok(quote!(::envbind::DeclaredType::class_named(#name)));
    };

    if attrs.raw {
        if attrs.wildcard.is_some() {
            return Err(syn::Error::new_spanned(
                &field.ident,
                "`raw` cannot be combined with `wildcard`",
            ));
        }
        return Ok(quote!(::envbind::DeclaredType::Raw(#shape)));
    }

    let element = match (&attrs.wildcard, element) {
        (Some(bounds), _) => quote! {
            ::envbind::DeclaredType::wildcard(::std::vec![
                #(::envbind::DeclaredType::class_named(#bounds)),*
            ])
        },
        (None, Some(element)) => {
            let name = type_name(element);
            quote!(::envbind::DeclaredType::class_named(#name))
        }
        (None, None) => quote!(::envbind::DeclaredType::class_named("_")),
    };

    Ok(quote!(::envbind::DeclaredType::collection(#shape, #element)))
}

/// `EnvBind` derive macro
///
/// Implements `envbind::EnvBind` for a struct with named fields: a binding
/// table with one entry per `#[env]` field, and a zero-argument constructor.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to all env var names
/// - `#[env(constructor = "path")]`: Zero-argument constructor function
/// - `#[env(no_constructor)]`: The struct has no zero-argument constructor
///
/// **Field-level**:
/// - `#[env]`: Bind from the upper-cased field name
/// - `#[env(name = "CUSTOM_NAME")]`: Custom environment variable name
/// - `#[env(separator = "PATTERN")]`: Collection element separator
/// - `#[env(wildcard = "Bound")]`: Wildcard element type with upper bounds
/// - `#[env(raw)]`: Collection without element type information
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_envbind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let container = ContainerAttrs::from_input(input)?;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "EnvBind only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "EnvBind only supports structs",
            ));
        }
    };

    let mut bindings = Vec::new();
    for field in fields {
        let Some(attrs) = FieldAttrs::from_field(field)? else {
            continue;
        };
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };

        // Determine environment variable name
        let base_name = attrs
            .name
            .clone()
            .unwrap_or_else(|| field_name.to_string().to_uppercase());
        let env_var_name = format!("{}{}", container.prefix, base_name);
        let member = field_name.to_string();

        let declared = declared_type(field, &attrs)?;
        let declaration = match &attrs.separator {
            Some(separator) => quote! {
                ::envbind::Declaration::new(#env_var_name, #declared).with_separator(#separator)
            },
            None => quote! {
                ::envbind::Declaration::new(#env_var_name, #declared)
            },
        };

        bindings.push(quote! {
            ::envbind::Binding::new(
                #member,
                #declaration,
                |target: &mut Self, value: ::envbind::BoundValue|
                    -> ::core::result::Result<(), ::envbind::BindError> {
                    target.#field_name = ::envbind::FromBound::from_bound(value)?;
                    ::core::result::Result::Ok(())
                },
            )
        });
    }

    let construct = match &container.constructor {
        Constructor::Default => quote! {
            ::core::option::Option::Some(<Self as ::core::default::Default>::default())
        },
        Constructor::Path(path) => quote! {
            ::core::option::Option::Some(#path())
        },
        Constructor::None => quote! {
            ::core::option::Option::None
        },
    };

    Ok(quote! {
        impl #impl_generics ::envbind::EnvBind for #struct_name #ty_generics #where_clause {
            fn bindings() -> ::std::vec::Vec<::envbind::Binding<Self>> {
                ::std::vec![#(#bindings),*]
            }

            fn construct_empty() -> ::core::option::Option<Self> {
                #construct
            }
        }
    })
}
