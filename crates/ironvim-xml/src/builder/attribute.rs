use std::borrow::Cow;

use crate::builder::{AliasMap, Namespace, NamespaceWrite, XmlBuilderError, escape};

/// An XML attribute. The value is escaped on write.
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    name: &'a str,
    value: Cow<'a, str>,
    namespace: Option<Namespace<'a>>,
}

impl<'a> Attribute<'a> {
    /// ```
    /// use ironvim_xml::builder::Attribute;
    /// let attribute = Attribute::new("type", "VirtualMachine");
    /// assert_eq!(attribute.value(), "VirtualMachine");
    /// ```
    pub fn new(name: &'a str, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name,
            value: value.into(),
            namespace: None,
        }
    }

    pub fn set_namespace(mut self, namespace: impl Into<Namespace<'a>>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<'a> NamespaceWrite<'a> for Attribute<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: &AliasMap<'a>,
    ) -> Result<(), XmlBuilderError> {
        let value = escape(&self.value);

        match &self.namespace {
            None => w.write_fmt(format_args!(" {}=\"{value}\"", self.name))?,
            Some(ns) => match aliases.get(ns) {
                Some(Some(alias)) => {
                    w.write_fmt(format_args!(" {alias}:{}=\"{value}\"", self.name))?;
                }
                // Unprefixed attributes never take the default namespace.
                Some(None) | None => {
                    return Err(XmlBuilderError::NamespaceHasNoAlias {
                        attr: self.name.to_string(),
                        ns: ns.url.to_string(),
                    });
                }
            },
        }

        Ok(())
    }
}
