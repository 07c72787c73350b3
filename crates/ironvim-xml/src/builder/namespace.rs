use core::fmt;
use std::hash::Hash;

/// An XML namespace, identified by its URI only. Aliases belong to declarations.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Namespace<'a> {
    pub url: &'a str,
}

impl PartialEq for Namespace<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Hash for Namespace<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl fmt::Display for Namespace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}

impl<'a> Namespace<'a> {
    /// ```
    /// use ironvim_xml::builder::Namespace;
    /// let namespace = Namespace::new("urn:vim25");
    /// assert_eq!(namespace.url, "urn:vim25");
    /// ```
    pub fn new(url: &'a str) -> Self {
        Self { url }
    }
}

impl<'a> From<&'a str> for Namespace<'a> {
    fn from(url: &'a str) -> Self {
        Namespace::new(url)
    }
}
