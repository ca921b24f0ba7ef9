//! Namespace-driven document registry.

use std::any::Any;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use quick_xml::events::{BytesStart, Event};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use isomap_core::{check_tree, Record};

use crate::remap::PathMap;
use crate::{EngineError, EngineResult};

/// Identifier of one schema revision within a message family.
pub trait VersionTag: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> VersionTag for T where T: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {}

/// One schema-version document type. Implemented through [`document!`](crate::document).
pub trait Document: Debug + Send + Sync {
    fn as_record(&self) -> &dyn Record;
    fn as_record_mut(&mut self) -> &mut dyn Record;
    fn as_any(&self) -> &dyn Any;
    fn namespace(&self) -> &str;
    fn set_namespace(&mut self, namespace: &str);
    fn to_xml(&self) -> EngineResult<String>;

    /// Facet self-check over the whole document.
    fn validate(&self) -> EngineResult<()> {
        check_tree(self.as_record()).map_err(EngineError::Invalid)
    }
}

/// Define a document root type: `<Document xmlns="..."><Element>body</Element></Document>`.
#[macro_export]
macro_rules! document {
    ($(#[$meta:meta])* $name:ident { $element:literal => $field:ident: $body:ty }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename = "Document")]
        pub struct $name {
            #[serde(rename = "@xmlns", default)]
            pub xmlns: String,
            #[serde(rename = $element)]
            pub $field: $body,
        }

        $crate::__core::impl_record!($name { $element => $field });

        impl $crate::Document for $name {
            fn as_record(&self) -> &dyn $crate::__core::Record { self }
            fn as_record_mut(&mut self) -> &mut dyn $crate::__core::Record { self }
            fn as_any(&self) -> &dyn ::std::any::Any { self }
            fn namespace(&self) -> &str { &self.xmlns }
            fn set_namespace(&mut self, namespace: &str) { self.xmlns = namespace.to_string(); }
            fn to_xml(&self) -> $crate::EngineResult<String> { $crate::xml::to_string(self) }
        }
    };
}

/// Root facts read without a typed parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Sniffed {
    pub root: String,
    pub namespace: Option<String>,
    /// First child of the root, e.g. `AcctRptgReq`.
    pub message: Option<String>,
}

/// Read the root element's `xmlns` and the first child element name.
pub fn sniff(raw: &[u8]) -> EngineResult<Sniffed> {
    fn local(e: &BytesStart<'_>) -> String { String::from_utf8_lossy(e.local_name().as_ref()).into_owned() }

    let mut reader = quick_xml::Reader::from_reader(raw);
    let mut buf = Vec::new();
    let mut sniffed: Option<Sniffed> = None;
    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => Some((e.into_owned(), false)),
            Ok(Event::Empty(e)) => Some((e.into_owned(), true)),
            Ok(Event::Eof) => break,
            Ok(_) => None,
            Err(e) => return Err(EngineError::InvalidXml(e.to_string())),
        };
        buf.clear();
        let Some((start, empty)) = event else { continue };
        match sniffed.as_mut() {
            None => {
                let mut namespace = None;
                for attr in start.attributes() {
                    let attr = attr.map_err(|e| EngineError::InvalidXml(e.to_string()))?;
                    if attr.key.as_ref() == b"xmlns" {
                        let v = attr.unescape_value().map_err(|e| EngineError::InvalidXml(e.to_string()))?;
                        namespace = Some(v.into_owned());
                    }
                }
                sniffed = Some(Sniffed { root: local(&start), namespace, message: None });
                if empty { break; }
            }
            Some(s) => {
                s.message = Some(local(&start));
                break;
            }
        }
    }
    sniffed.ok_or_else(|| EngineError::InvalidXml("no root element".into()))
}

/// Binds a version tag to its namespace, document type and path map.
pub struct Registration<V> {
    pub version: V,
    pub namespace: &'static str,
    pub construct: fn() -> Box<dyn Document>,
    pub parse: fn(&str) -> EngineResult<Box<dyn Document>>,
    pub path_map: PathMap,
}

fn construct_boxed<D: Document + Default + 'static>() -> Box<dyn Document> { Box::<D>::default() }

fn parse_boxed<D: Document + DeserializeOwned + 'static>(raw: &str) -> EngineResult<Box<dyn Document>> {
    let doc: D = crate::xml::from_str(raw)?;
    Ok(Box::new(doc))
}

impl<V: VersionTag> Registration<V> {
    pub fn of<D>(version: V, namespace: &'static str, path_map: PathMap) -> Self
    where
        D: Document + Default + DeserializeOwned + 'static,
    {
        Self { version, namespace, construct: construct_boxed::<D>, parse: parse_boxed::<D>, path_map }
    }
}

impl<V: Debug> Debug for Registration<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("version", &self.version)
            .field("namespace", &self.namespace)
            .field("rules", &self.path_map.rules().len())
            .finish()
    }
}

/// Immutable registry for one message family, in registration order (oldest first).
#[derive(Debug)]
pub struct DocumentRegistry<V> {
    entries: Vec<Registration<V>>,
    by_namespace: FxHashMap<&'static str, usize>,
    by_version: FxHashMap<V, usize>,
}

impl<V: VersionTag> DocumentRegistry<V> {
    pub fn new(entries: Vec<Registration<V>>) -> EngineResult<Self> {
        let mut by_namespace = FxHashMap::default();
        let mut by_version = FxHashMap::default();
        for (i, reg) in entries.iter().enumerate() {
            if by_namespace.insert(reg.namespace, i).is_some() {
                return Err(EngineError::DuplicateRegistration(reg.namespace.to_string()));
            }
            if by_version.insert(reg.version, i).is_some() {
                return Err(EngineError::DuplicateRegistration(reg.version.to_string()));
            }
        }
        Ok(Self { entries, by_namespace, by_version })
    }

    pub fn registration(&self, version: V) -> EngineResult<&Registration<V>> {
        self.by_version
            .get(&version)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| EngineError::UnknownVersion(version.to_string()))
    }

    pub fn version_for(&self, namespace: &str) -> Option<V> {
        self.by_namespace.get(namespace).map(|&i| self.entries[i].version)
    }

    pub fn namespace_for(&self, version: V) -> Option<&'static str> {
        self.by_version.get(&version).map(|&i| self.entries[i].namespace)
    }

    pub fn versions(&self) -> impl Iterator<Item = V> + '_ { self.entries.iter().map(|r| r.version) }

    pub fn latest(&self) -> Option<V> { self.entries.last().map(|r| r.version) }

    /// Dispatch a wire payload on its root namespace and parse it with the matching type.
    pub fn lookup(&self, raw: &[u8]) -> EngineResult<(Box<dyn Document>, V)> {
        let sniffed = sniff(raw)?;
        let namespace = sniffed.namespace.ok_or(EngineError::MissingNamespace)?;
        let reg = self
            .by_namespace
            .get(namespace.as_str())
            .map(|&i| &self.entries[i])
            .ok_or_else(|| EngineError::UnknownNamespace(namespace.clone()))?;
        let text = std::str::from_utf8(raw).map_err(|e| EngineError::InvalidXml(e.to_string()))?;
        let mut doc = (reg.parse)(text)?;
        doc.set_namespace(reg.namespace);
        debug!(namespace = %reg.namespace, version = %reg.version, "document dispatched");
        Ok((doc, reg.version))
    }

    /// Empty document for `version`, stamped with its namespace.
    pub fn construct(&self, version: V) -> EngineResult<Box<dyn Document>> {
        let reg = self.registration(version)?;
        let mut doc = (reg.construct)();
        doc.set_namespace(reg.namespace);
        Ok(doc)
    }
}
