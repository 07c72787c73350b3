pub const SOAP_ENVELOPE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_ENVELOPE_ALIAS: &str = "soapenv";
pub const VIM25: &str = "urn:vim25";
