use chrono::{DateTime as ChronoDateTime, SecondsFormat, Utc};
use ironvim_xml::builder::{Element, XmlSerialize};
use ironvim_xml::parser::XmlDeserialize;
use ironvim_xml::{FromXmlText, TextVisitor, XmlError};

/// An `xsd:dateTime`, normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(pub ChronoDateTime<Utc>);

impl DateTime {
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl From<ChronoDateTime<Utc>> for DateTime {
    fn from(value: ChronoDateTime<Utc>) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromXmlText for DateTime {
    const TYPE_NAME: &'static str = "dateTime";

    fn from_xml_text(text: &str) -> Result<Self, XmlError> {
        ChronoDateTime::parse_from_rfc3339(text.trim())
            .map(|value| Self(value.with_timezone(&Utc)))
            .map_err(|_| XmlError::InvalidValue {
                ty: Self::TYPE_NAME,
                value: text.to_string(),
            })
    }
}

impl<'a> XmlDeserialize<'a> for DateTime {
    type Visitor = TextVisitor<'a, Self>;

    fn visitor() -> Self::Visitor {
        TextVisitor::default()
    }
}

impl XmlSerialize for DateTime {
    fn append_to_element<'a>(&'a self, element: Element<'a>) -> Element<'a> {
        element.set_text(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offsets_are_normalized() {
        let parsed = DateTime::from_xml_text("2024-05-01T12:30:00.5+02:00").unwrap();
        assert_eq!(parsed.to_string(), "2024-05-01T10:30:00.500Z");
    }

    #[test]
    fn test_whole_seconds_have_no_fraction() {
        let value = DateTime(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(value.to_string(), "2024-01-02T03:04:05Z");
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            DateTime::from_xml_text("yesterday"),
            Err(XmlError::InvalidValue { ty: "dateTime", .. })
        ));
    }
}
