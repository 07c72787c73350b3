use roxmltree::NodeType;

pub mod builder;
pub mod parser;
mod value;

pub use value::{FromXmlText, TextVisitor};

pub const XSI_NAMESPACE_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XSI_NAMESPACE_ALIAS: &str = "xsi";
pub const XSD_NAMESPACE_URI: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSD_NAMESPACE_ALIAS: &str = "xsd";

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("Invalid XML: {0}")]
    ParserError(#[from] crate::parser::Error),

    #[error("XML Builder error: {0}")]
    BuilderError(#[from] crate::builder::XmlBuilderError),

    #[error("Invalid namespace: expected '{expected}', found '{found:?}'")]
    XmlInvalidNamespace {
        expected: String,
        found: Option<String>,
    },

    #[error("Invalid tag: expected '{expected}', found '{found}'")]
    XmlInvalidTag { expected: String, found: String },

    #[error("Missing {field} in {parent}")]
    MissingField {
        field: &'static str,
        parent: &'static str,
    },

    #[error("Invalid {ty} value: {value:?}")]
    InvalidValue { ty: &'static str, value: String },

    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    #[error("Unexpected tag: {0}")]
    UnexpectedTag(String),

    #[error("Invalid node type: expected '{expected:?}', found {found:?}")]
    InvalidNodeType { expected: NodeType, found: NodeType },
}

/// Items referenced by `ironvim-macros` expansions.
#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
