use crate::builder::{AliasMap, Declaration, Element, NamespaceWrite, XmlBuilderError};

/// A document: optional declaration plus the root element.
pub struct Builder<'a> {
    declaration: Option<Declaration<'a>>,
    element: Element<'a>,
}

impl<'a> Builder<'a> {
    /// ```
    /// use ironvim_xml::builder::{Builder, Declaration, Element};
    /// let builder = Builder::new(Some(Declaration::new("1.0", "UTF-8")), Element::new("root"));
    /// assert!(builder.to_xml_string().unwrap().ends_with("<root/>"));
    /// ```
    pub fn new(declaration: Option<Declaration<'a>>, element: Element<'a>) -> Self {
        Self {
            declaration,
            element,
        }
    }

    pub fn write_to<W: std::io::Write>(&self, mut w: W) -> Result<(), XmlBuilderError> {
        if let Some(declaration) = &self.declaration {
            declaration.write(&mut w)?;
            w.write_all(b"\n")?;
        }
        self.element.ns_write(&mut w, &AliasMap::new())
    }

    pub fn to_xml_string(&self) -> Result<String, XmlBuilderError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
