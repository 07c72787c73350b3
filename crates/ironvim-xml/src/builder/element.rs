use std::borrow::Cow;

use crate::builder::{AliasMap, Attribute, Namespace, NamespaceWrite, XmlBuilderError, escape};

#[derive(Debug, Clone)]
pub enum Content<'a> {
    Text(Cow<'a, str>),
    Elements(Vec<Element<'a>>),
    None,
}

/// An XML element under construction.
///
/// Namespaces are attached by URI. The alias used on the wire comes from the
/// declarations made on this element or any of its ancestors, so the same subtree
/// can be written under different prefixes.
#[derive(Debug, Clone)]
pub struct Element<'a> {
    name: &'a str,
    namespace: Option<Namespace<'a>>,
    namespaces_declaration: Vec<(Namespace<'a>, Option<&'a str>)>,
    attributes: Vec<Attribute<'a>>,
    content: Content<'a>,
}

impl<'a> Element<'a> {
    /// ```
    /// use ironvim_xml::builder::Element;
    /// let element = Element::new("root");
    /// assert_eq!(element.name(), "root");
    /// ```
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            namespace: None,
            namespaces_declaration: Vec::new(),
            attributes: Vec::new(),
            content: Content::None,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn set_namespace(mut self, namespace: impl Into<Namespace<'a>>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn set_namespace_optional(mut self, namespace: Option<impl Into<Namespace<'a>>>) -> Self {
        self.namespace = namespace.map(Into::into);
        self
    }

    /// Declares `url` on this element. `None` makes it the default namespace.
    pub fn add_namespace_declaration(mut self, url: &'a str, alias: Option<&'a str>) -> Self {
        self.namespaces_declaration
            .push((Namespace::new(url), alias));
        self
    }

    pub fn add_attribute(mut self, attribute: Attribute<'a>) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn attributes(&self) -> &[Attribute<'a>] {
        &self.attributes
    }

    /// Appends a child. Any text content is discarded.
    pub fn add_child(mut self, child: Self) -> Self {
        match self.content {
            Content::None | Content::Text(_) => {
                self.content = Content::Elements(vec![child]);
            }
            Content::Elements(ref mut children) => {
                children.push(child);
            }
        }
        self
    }

    pub fn add_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        for child in children {
            self = self.add_child(child);
        }
        self
    }

    /// Replaces the content with text. Existing children are discarded.
    pub fn set_text(mut self, text: impl Into<Cow<'a, str>>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn content(&self) -> &Content<'a> {
        &self.content
    }

    /// Writes this element as a standalone fragment.
    pub fn to_xml_string(&self) -> Result<String, XmlBuilderError> {
        let mut buf = Vec::new();
        self.ns_write(&mut buf, &AliasMap::new())?;
        Ok(String::from_utf8(buf)?)
    }

    fn qualified_name(&self, aliases: &AliasMap<'a>) -> Result<Cow<'a, str>, XmlBuilderError> {
        let Some(namespace) = &self.namespace else {
            return Ok(Cow::Borrowed(self.name));
        };

        match aliases.get(namespace) {
            Some(Some(alias)) => Ok(Cow::Owned(format!("{alias}:{}", self.name))),
            Some(None) => Ok(Cow::Borrowed(self.name)),
            None => Err(XmlBuilderError::NamespaceNotDeclared {
                tag: self.name.to_string(),
                ns: namespace.url.to_string(),
            }),
        }
    }
}

impl<'a> NamespaceWrite<'a> for Element<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: &AliasMap<'a>,
    ) -> Result<(), XmlBuilderError> {
        let scope: Cow<'_, AliasMap<'a>> = if self.namespaces_declaration.is_empty() {
            Cow::Borrowed(aliases)
        } else {
            let mut scope = aliases.clone();
            for (namespace, alias) in &self.namespaces_declaration {
                scope.insert(*namespace, *alias);
            }
            Cow::Owned(scope)
        };

        let name = self.qualified_name(&scope)?;
        w.write_fmt(format_args!("<{name}"))?;

        for (namespace, alias) in &self.namespaces_declaration {
            match alias {
                Some(alias) => w.write_fmt(format_args!(" xmlns:{alias}=\"{}\"", namespace.url))?,
                None => w.write_fmt(format_args!(" xmlns=\"{}\"", namespace.url))?,
            }
        }

        for attribute in &self.attributes {
            attribute.ns_write(w, &scope)?;
        }

        match &self.content {
            Content::None => w.write_all(b"/>")?,
            Content::Text(text) => {
                w.write_fmt(format_args!(">{}</{name}>", escape(text)))?;
            }
            Content::Elements(children) => {
                w.write_all(b">")?;
                for child in children {
                    child.ns_write(w, &scope)?;
                }
                w.write_fmt(format_args!("</{name}>"))?;
            }
        }

        Ok(())
    }
}
