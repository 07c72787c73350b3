/// Declares a string-valued vim25 enum (e.g. `TaskInfoState`).
macro_rules! xml_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $wire:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::ironvim_xml::XmlError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok(Self::$variant),)*
                    other => Err(::ironvim_xml::XmlError::InvalidValue {
                        ty: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl ::ironvim_xml::FromXmlText for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn from_xml_text(text: &str) -> Result<Self, ::ironvim_xml::XmlError> {
                text.trim().parse()
            }
        }

        impl<'a> ::ironvim_xml::parser::XmlDeserialize<'a> for $name {
            type Visitor = ::ironvim_xml::TextVisitor<'a, Self>;

            fn visitor() -> Self::Visitor {
                ::ironvim_xml::TextVisitor::default()
            }
        }

        impl ::ironvim_xml::builder::XmlSerialize for $name {
            fn append_to_element<'a>(
                &'a self,
                element: ::ironvim_xml::builder::Element<'a>,
            ) -> ::ironvim_xml::builder::Element<'a> {
                element.set_text(self.as_str())
            }
        }
    };
}

/// Declares request types whose only argument is the target object.
macro_rules! this_requests {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, ::ironvim_macros::XmlSerialize, ::ironvim_macros::XmlDeserialize)]
            pub struct $name {
                #[xml(rename = "_this")]
                pub this: $crate::types::ManagedObjectReference,
            }

            impl $name {
                pub fn new(this: $crate::types::ManagedObjectReference) -> Self {
                    Self { this }
                }
            }
        )*
    };
}

pub(crate) use {this_requests, xml_enum};
