use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type, parse_macro_input,
};

/// Derives `XmlSerialize` for a struct with named fields.
///
/// Every field becomes a child element named after the field in lowerCamelCase,
/// in declaration order. `Option` fields are omitted when `None`, `Vec` fields
/// repeat the element once per item.
///
/// Attributes:
/// - `#[xml(rename = "_this")]` on a field overrides the element name.
/// - `#[xml(type_name = "TraversalSpec")]` on the struct reports an `xsi:type`.
#[proc_macro_derive(XmlSerialize, attributes(xml))]
pub fn derive_xml_serialize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    impl_xml_serialize(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `XmlDeserialize` for a struct with named fields, along with a
/// `<Name>Visitor` type.
///
/// Children are matched by local name; unknown children are skipped. A missing
/// non-`Option`, non-`Vec` field is an error unless marked `#[xml(default)]`.
#[proc_macro_derive(XmlDeserialize, attributes(xml))]
pub fn derive_xml_deserialize(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    impl_xml_deserialize(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Clone, Copy)]
enum Shape {
    Required,
    Optional,
    Repeated,
}

struct FieldEntry {
    ident: Ident,
    xml_name: String,
    shape: Shape,
    /// The element type: `T` for `Option<T>` and `Vec<T>`, the field type otherwise.
    inner: Type,
    default: bool,
}

#[derive(Default)]
struct ContainerAttrs {
    type_name: Option<String>,
}

fn container_attrs(input: &DeriveInput) -> syn::Result<ContainerAttrs> {
    let mut attrs = ContainerAttrs::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("xml")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_name") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.type_name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported xml container attribute"))
            }
        })?;
    }
    Ok(attrs)
}

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<FieldEntry>> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "xml derives do not support generic types",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "xml derives can only be used on structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "xml derives need named fields",
        ));
    };

    fields
        .named
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "unnamed field"))?;

            let mut rename = None;
            let mut default = false;
            for attr in field.attrs.iter().filter(|a| a.path().is_ident("xml")) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        let value: LitStr = meta.value()?.parse()?;
                        rename = Some(value.value());
                        Ok(())
                    } else if meta.path.is_ident("default") {
                        default = true;
                        Ok(())
                    } else {
                        Err(meta.error("unsupported xml field attribute"))
                    }
                })?;
            }

            let (shape, inner) = if let Some(inner) = wrapped_type(&field.ty, "Option") {
                (Shape::Optional, inner.clone())
            } else if let Some(inner) = wrapped_type(&field.ty, "Vec") {
                (Shape::Repeated, inner.clone())
            } else {
                (Shape::Required, field.ty.clone())
            };

            let xml_name = rename.unwrap_or_else(|| lower_camel(&ident.to_string()));

            Ok(FieldEntry {
                ident,
                xml_name,
                shape,
                inner,
                default,
            })
        })
        .collect()
}

/// Returns `T` when `ty` is written as `wrapper<T>` (last path segment).
fn wrapped_type<'t>(ty: &'t Type, wrapper: &str) -> Option<&'t Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn lower_camel(field: &str) -> String {
    let field = field.strip_prefix("r#").unwrap_or(field);
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn impl_xml_serialize(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let fields = named_fields(input)?;
    let attrs = container_attrs(input)?;

    let pushes = fields.iter().map(|entry| {
        let ident = &entry.ident;
        let xml_name = &entry.xml_name;
        match entry.shape {
            Shape::Required => quote! {
                children.push(::ironvim_xml::builder::serialize_child(#xml_name, &self.#ident));
            },
            Shape::Optional => quote! {
                if let Some(value) = &self.#ident {
                    children.push(::ironvim_xml::builder::serialize_child(#xml_name, value));
                }
            },
            Shape::Repeated => quote! {
                for value in &self.#ident {
                    children.push(::ironvim_xml::builder::serialize_child(#xml_name, value));
                }
            },
        }
    });

    let xsi_type = attrs.type_name.map(|type_name| {
        quote! {
            fn xsi_type(&self) -> Option<&'static str> {
                Some(#type_name)
            }
        }
    });

    Ok(quote! {
        impl ::ironvim_xml::builder::XmlSerialize for #name {
            fn append_to_element<'a>(
                &'a self,
                element: ::ironvim_xml::builder::Element<'a>,
            ) -> ::ironvim_xml::builder::Element<'a> {
                let mut children: Vec<::ironvim_xml::builder::Element<'a>> = Vec::new();
                #(#pushes)*
                element.add_children(children)
            }

            #xsi_type
        }
    })
}

fn impl_xml_deserialize(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let vis = &input.vis;
    let fields = named_fields(input)?;
    let visitor_name = format_ident!("{}Visitor", name);
    let parent = name.to_string();

    let slots = fields.iter().map(|entry| {
        let ident = &entry.ident;
        let inner = &entry.inner;
        match entry.shape {
            Shape::Repeated => quote! { #ident: Vec<#inner> },
            Shape::Required | Shape::Optional => quote! { #ident: Option<#inner> },
        }
    });

    let arms = fields.iter().map(|entry| {
        let ident = &entry.ident;
        let inner = &entry.inner;
        let xml_name = &entry.xml_name;
        let parse = quote! {
            <#inner as ::ironvim_xml::parser::XmlDeserialize<'a>>::from_node(child)?
        };
        match entry.shape {
            Shape::Repeated => quote! { #xml_name => self.#ident.push(#parse), },
            Shape::Required | Shape::Optional => quote! { #xml_name => self.#ident = Some(#parse), },
        }
    });

    let assignments = fields.iter().map(|entry| {
        let ident = &entry.ident;
        let field = ident.to_string();
        match (entry.shape, entry.default) {
            (Shape::Optional | Shape::Repeated, _) => quote! { #ident: self.#ident },
            (Shape::Required, true) => quote! { #ident: self.#ident.unwrap_or_default() },
            (Shape::Required, false) => quote! {
                #ident: self.#ident.ok_or(::ironvim_xml::XmlError::MissingField {
                    field: #field,
                    parent: #parent,
                })?
            },
        }
    });

    Ok(quote! {
        #[derive(Default)]
        #vis struct #visitor_name {
            #(#slots,)*
        }

        impl<'a> ::ironvim_xml::parser::XmlVisitor<'a> for #visitor_name {
            type Value = #name;

            fn visit_children(
                &mut self,
                children: impl Iterator<Item = ::ironvim_xml::parser::Node<'a, 'a>>,
            ) -> Result<(), ::ironvim_xml::XmlError> {
                for child in children.filter(|child| child.is_element()) {
                    match child.tag_name().name() {
                        #(#arms)*
                        other => {
                            ::ironvim_xml::__private::tracing::trace!(
                                tag = other,
                                parent = #parent,
                                "skipping unmodeled element"
                            );
                        }
                    }
                }
                Ok(())
            }

            fn finish(self) -> Result<Self::Value, ::ironvim_xml::XmlError> {
                Ok(#name {
                    #(#assignments,)*
                })
            }
        }

        impl<'a> ::ironvim_xml::parser::XmlDeserialize<'a> for #name {
            type Visitor = #visitor_name;

            fn visitor() -> Self::Visitor {
                #visitor_name::default()
            }
        }
    })
}
