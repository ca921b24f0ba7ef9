//! quick-xml serde glue for generated document types.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{EngineError, EngineResult};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Serialize a document under a `<Document>` root with two-space indentation.
pub fn to_string<T: Serialize>(doc: &T) -> EngineResult<String> {
    let mut out = String::new();
    let mut ser = quick_xml::se::Serializer::with_root(&mut out, Some("Document"))
        .map_err(|e| EngineError::Serialize(e.to_string()))?;
    ser.indent(' ', 2);
    doc.serialize(ser).map_err(|e| EngineError::Serialize(e.to_string()))?;
    Ok(out)
}

pub fn from_str<T: DeserializeOwned>(raw: &str) -> EngineResult<T> {
    quick_xml::de::from_str(raw).map_err(|e| EngineError::InvalidXml(e.to_string()))
}

/// Prepend the XML declaration when the payload does not carry one.
pub fn with_declaration(body: &str) -> String {
    if body.trim_start().starts_with("<?xml") {
        body.to_string()
    } else {
        format!("{}\n{}\n", XML_DECLARATION, body)
    }
}
