//! Per-family orchestration: registry + path maps + required fields.

use std::marker::PhantomData;
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, info};

use isomap_core::{Path, Record};

use crate::convert;
use crate::registry::{Document, DocumentRegistry, VersionTag};
use crate::remap::{resolve, Direction, FlatEntry};
use crate::{xml, EngineError, EngineResult};

/// A stable per-family model record.
pub trait Model: Record + Default + 'static {}

impl<T: Record + Default + 'static> Model for T {}

/// Converts between one family's documents (all registered versions) and its model.
///
/// Built once per process and shared read-only.
pub struct Processor<M, V> {
    family: &'static str,
    registry: DocumentRegistry<V>,
    required: Vec<Path>,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model, V: VersionTag> Processor<M, V> {
    pub fn new(family: &'static str, registry: DocumentRegistry<V>, required: &[&str]) -> EngineResult<Self> {
        let required = required.iter().map(|r| Path::parse(r)).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { family, registry, required, _model: PhantomData })
    }

    pub fn family(&self) -> &'static str { self.family }

    pub fn registry(&self) -> &DocumentRegistry<V> { &self.registry }

    pub fn required(&self) -> &[Path] { &self.required }

    pub fn versions(&self) -> Vec<V> { self.registry.versions().collect() }

    pub fn latest(&self) -> EngineResult<V> {
        self.registry.latest().ok_or_else(|| EngineError::UnknownVersion(format!("{}: none registered", self.family)))
    }

    /// Flatten the version's path map against `instance` for inspection.
    pub fn resolve(&self, instance: &dyn Record, version: V, direction: Direction) -> EngineResult<Vec<FlatEntry>> {
        resolve(instance, &self.registry.registration(version)?.path_map, direction)
    }

    /// Parse wire bytes of any registered version into the model.
    pub fn parse(&self, raw: &[u8]) -> EngineResult<(M, V)> {
        let started = Instant::now();
        let result = self
            .registry
            .lookup(raw)
            .and_then(|(doc, version)| self.to_model(&*doc, version).map(|m| (m, version)));
        self.observe(Direction::ToModel, started, result.is_ok());
        result
    }

    /// Parse, then run the required-field gate on the resulting model.
    pub fn parse_checked(&self, raw: &[u8]) -> EngineResult<(M, V)> {
        let (model, version) = self.parse(raw)?;
        self.check_required(&model)?;
        Ok((model, version))
    }

    pub fn to_model(&self, document: &dyn Document, version: V) -> EngineResult<M> {
        let reg = self.registry.registration(version)?;
        let entries = resolve(document.as_record(), &reg.path_map, Direction::ToModel)?;
        convert::to_model::<M>(document.as_record(), &entries)
    }

    pub fn check_required(&self, model: &M) -> EngineResult<()> {
        convert::check_required(model, &self.required)
    }

    /// Build the `version` document for `model`. Required fields are checked before
    /// any document is constructed; on error no document is returned.
    pub fn render(&self, model: &M, version: V) -> EngineResult<Box<dyn Document>> {
        let started = Instant::now();
        let result = self.render_inner(model, version);
        self.observe(Direction::ToDocument, started, result.is_ok());
        result
    }

    fn render_inner(&self, model: &M, version: V) -> EngineResult<Box<dyn Document>> {
        self.check_required(model)?;
        let reg = self.registry.registration(version)?;
        let entries = resolve(model, &reg.path_map, Direction::ToDocument)?;
        let mut doc = self.registry.construct(version)?;
        convert::fill_document(model, doc.as_record_mut(), &entries)?;
        debug!(family = self.family, version = %version, "document rendered");
        Ok(doc)
    }

    /// Render, self-validate and serialize with an XML declaration.
    /// Defaults to the latest registered version.
    pub fn write_xml(&self, model: &M, version: Option<V>) -> EngineResult<String> {
        let version = match version { Some(v) => v, None => self.latest()? };
        let doc = self.render(model, version)?;
        doc.validate()?;
        let body = doc.to_xml()?;
        info!(family = self.family, version = %version, bytes = body.len(), "xml written");
        Ok(xml::with_declaration(&body))
    }

    fn observe(&self, direction: Direction, started: Instant, ok: bool) {
        let ms = started.elapsed().as_secs_f64() * 1000.0;
        counter!("conversions_total", 1u64, "direction" => direction.as_str(), "family" => self.family);
        if !ok {
            counter!("conversion_errors_total", 1u64, "direction" => direction.as_str(), "family" => self.family);
        }
        histogram!("conversion_ms", ms, "direction" => direction.as_str());
    }
}
