//! Path maps: per-version tables relating document paths to model paths.
//!
//! A map is an ordered list of [`Rule`]s. Flat rules relate one field to one
//! field. Expand rules relate a repeated document element to a repeated model
//! field and carry child rules relative to one element; they are resolved
//! against a concrete instance, once per element present.

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::warn;

use isomap_core::{access, AccessError, Path, Record};

use crate::EngineResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    Flat { document: Path, model: Path },
    Expand { document: Path, model: Path, children: Vec<Rule> },
}

impl Rule {
    pub fn document(&self) -> &Path {
        match self { Rule::Flat { document, .. } | Rule::Expand { document, .. } => document }
    }

    pub fn model(&self) -> &Path {
        match self { Rule::Flat { model, .. } | Rule::Expand { model, .. } => model }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error(transparent)]
    Path(#[from] AccessError),
    #[error("expansion parent '{0}' must not carry an index")]
    IndexedParent(String),
    #[error("expansion '{0}' has no child rules")]
    EmptyExpansion(String),
    #[error("overlapping {side} path '{path}'")]
    Overlap { side: &'static str, path: String },
}

/// Validated, immutable rule table for one schema version.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathMap {
    rules: Vec<Rule>,
}

impl PathMap {
    pub fn builder() -> PathMapBuilder { PathMapBuilder::default() }

    /// Rejects malformed expansions and any two rules that can address the same
    /// document or model field, including a flat rule that lands on an element
    /// a fan-out also writes.
    pub fn new(rules: Vec<Rule>) -> Result<Self, MapError> {
        validate(&rules)?;
        check_leaves(&rules)?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] { &self.rules }

    pub fn is_empty(&self) -> bool { self.rules.is_empty() }
}

fn validate(rules: &[Rule]) -> Result<(), MapError> {
    let mut documents = FxHashSet::default();
    let mut models = FxHashSet::default();
    for rule in rules {
        if !documents.insert(rule.document().to_string()) {
            return Err(MapError::Overlap { side: "document", path: rule.document().to_string() });
        }
        if !models.insert(rule.model().to_string()) {
            return Err(MapError::Overlap { side: "model", path: rule.model().to_string() });
        }
        if let Rule::Expand { document, model, children } = rule {
            for parent in [document, model] {
                if parent.last().index.is_some() {
                    return Err(MapError::IndexedParent(parent.to_string()));
                }
            }
            if children.is_empty() {
                return Err(MapError::EmptyExpansion(document.to_string()));
            }
            validate(children)?;
        }
    }
    Ok(())
}

/// Position of one template segment: no index, a fixed index, or every element of a fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Plain,
    At(usize),
    Each,
}

type Template = Vec<(String, Slot)>;

struct Leaf {
    document: Template,
    model: Template,
}

fn anchored(base: &Template, path: &Path) -> Template {
    let mut t = base.clone();
    t.extend(path.segments().iter().map(|s| (s.name.clone(), s.index.map_or(Slot::Plain, Slot::At))));
    t
}

fn leaves(rules: &[Rule], document: &Template, model: &Template, out: &mut Vec<Leaf>) {
    for rule in rules {
        let (d, m) = (anchored(document, rule.document()), anchored(model, rule.model()));
        match rule {
            Rule::Flat { .. } => out.push(Leaf { document: d, model: m }),
            Rule::Expand { children, .. } => {
                let (mut d, mut m) = (d, m);
                for t in [&mut d, &mut m] {
                    if let Some(last) = t.last_mut() { last.1 = Slot::Each; }
                }
                leaves(children, &d, &m, out);
            }
        }
    }
}

fn collide(a: &Template, b: &Template) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|((na, sa), (nb, sb))| {
            na == nb
                && match (sa, sb) {
                    (Slot::Each, Slot::Each | Slot::At(_)) | (Slot::At(_), Slot::Each) => true,
                    _ => sa == sb,
                }
        })
}

fn render(t: &Template) -> String {
    let segments: Vec<String> = t
        .iter()
        .map(|(name, slot)| match slot {
            Slot::Plain => name.clone(),
            Slot::At(i) => format!("{}[{}]", name, i),
            Slot::Each => format!("{}[*]", name),
        })
        .collect();
    segments.join(".")
}

fn check_leaves(rules: &[Rule]) -> Result<(), MapError> {
    let mut all = Vec::new();
    leaves(rules, &Template::new(), &Template::new(), &mut all);
    for (i, later) in all.iter().enumerate() {
        for earlier in &all[..i] {
            if collide(&earlier.document, &later.document) {
                return Err(MapError::Overlap { side: "document", path: render(&later.document) });
            }
            if collide(&earlier.model, &later.model) {
                return Err(MapError::Overlap { side: "model", path: render(&later.model) });
            }
        }
    }
    Ok(())
}

/// Collects rules in declaration order; the first malformed path is reported by `build`.
#[derive(Debug, Default)]
pub struct PathMapBuilder {
    rules: Vec<Rule>,
    error: Option<MapError>,
}

impl PathMapBuilder {
    pub fn flat(mut self, document: &str, model: &str) -> Self {
        match (Path::parse(document), Path::parse(model)) {
            (Ok(document), Ok(model)) => self.rules.push(Rule::Flat { document, model }),
            (Err(e), _) | (_, Err(e)) => self.fail(e.into()),
        }
        self
    }

    pub fn expand(mut self, document: &str, model: &str, children: impl FnOnce(PathMapBuilder) -> PathMapBuilder) -> Self {
        let inner = children(PathMapBuilder::default());
        if let Some(e) = inner.error {
            self.fail(e);
            return self;
        }
        match (Path::parse(document), Path::parse(model)) {
            (Ok(document), Ok(model)) => self.rules.push(Rule::Expand { document, model, children: inner.rules }),
            (Err(e), _) | (_, Err(e)) => self.fail(e.into()),
        }
        self
    }

    /// Append every rule of an already validated map, e.g. a shared base table.
    pub fn extend(mut self, base: &PathMap) -> Self {
        self.rules.extend(base.rules.iter().cloned());
        self
    }

    pub fn build(self) -> Result<PathMap, MapError> {
        match self.error {
            Some(e) => Err(e),
            None => PathMap::new(self.rules),
        }
    }

    fn fail(&mut self, e: MapError) {
        if self.error.is_none() { self.error = Some(e); }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Document is the source, model the target.
    ToModel,
    /// Model is the source, document the target.
    ToDocument,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self { Direction::ToModel => "to_model", Direction::ToDocument => "to_document" }
    }

    fn entry(self, document: Path, model: Path) -> FlatEntry {
        match self {
            Direction::ToModel => FlatEntry { source: document, target: model },
            Direction::ToDocument => FlatEntry { source: model, target: document },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatEntry {
    pub source: Path,
    pub target: Path,
}

/// Flatten `map` against `instance`, which is the source side for `direction`.
/// Fan-out rules contribute one set of child entries per element present.
pub fn resolve(instance: &dyn Record, map: &PathMap, direction: Direction) -> EngineResult<Vec<FlatEntry>> {
    let mut out = Vec::with_capacity(map.rules.len());
    resolve_into(instance, &map.rules, None, direction, &mut out)?;
    metrics::histogram!("resolved_entries", out.len() as f64, "direction" => direction.as_str());
    Ok(out)
}

fn resolve_into(
    instance: &dyn Record,
    rules: &[Rule],
    base: Option<(&Path, &Path)>,
    direction: Direction,
    out: &mut Vec<FlatEntry>,
) -> EngineResult<()> {
    let anchor = |document: &Path, model: &Path| match base {
        Some((d, m)) => (d.join(document), m.join(model)),
        None => (document.clone(), model.clone()),
    };
    for rule in rules {
        match rule {
            Rule::Flat { document, model } => {
                let (document, model) = anchor(document, model);
                out.push(direction.entry(document, model));
            }
            Rule::Expand { document, model, children } => {
                let (document, model) = anchor(document, model);
                let counted = match direction { Direction::ToModel => &document, Direction::ToDocument => &model };
                let n = match access::count(instance, counted) {
                    Ok(n) => n,
                    Err(e) if e.is_absence() => 0,
                    Err(e) if direction == Direction::ToModel && e.is_structural() => {
                        warn!(path = %counted, error = %e, "repeated element does not resolve; expanded to nothing");
                        0
                    }
                    Err(e) => return Err(e.into()),
                };
                for i in 0..n {
                    let (d, m) = (document.with_index(i), model.with_index(i));
                    resolve_into(instance, children, Some((&d, &m)), direction, out)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let map = PathMap::builder()
            .flat("Doc.B", "B")
            .flat("Doc.A", "A")
            .expand("Doc.Items", "Items", |b| b.flat("Nm", "Name"))
            .build()
            .unwrap();
        let docs: Vec<String> = map.rules().iter().map(|r| r.document().to_string()).collect();
        assert_eq!(docs, vec!["Doc.B", "Doc.A", "Doc.Items"]);
    }

    #[test]
    fn builder_rejects_overlapping_targets() {
        let err = PathMap::builder().flat("Doc.A", "A").flat("Doc.B", "A").build().unwrap_err();
        assert_eq!(err, MapError::Overlap { side: "model", path: "A".into() });
        let err = PathMap::builder().flat("Doc.A", "A").flat("Doc.A", "B").build().unwrap_err();
        assert_eq!(err, MapError::Overlap { side: "document", path: "Doc.A".into() });
    }

    #[test]
    fn builder_rejects_malformed_expansions() {
        let err = PathMap::builder().expand("Doc.Items[0]", "Items", |b| b.flat("Nm", "Name")).build().unwrap_err();
        assert_eq!(err, MapError::IndexedParent("Doc.Items[0]".into()));
        let err = PathMap::builder().expand("Doc.Items", "Items", |b| b).build().unwrap_err();
        assert_eq!(err, MapError::EmptyExpansion("Doc.Items".into()));
        let err = PathMap::builder().flat("Doc..A", "A").build().unwrap_err();
        assert!(matches!(err, MapError::Path(AccessError::InvalidPath(_))));
        let err = PathMap::builder()
            .expand("Doc.Items", "Items", |b| b.flat("Nm", "Name").flat("Id", "Name"))
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::Overlap { .. }));
    }

    #[test]
    fn builder_rejects_flat_rules_inside_a_fanout() {
        let err = PathMap::builder()
            .flat("X.Items[0].Nm", "FirstName")
            .expand("X.Items", "Items", |b| b.flat("Nm", "Name"))
            .build()
            .unwrap_err();
        assert_eq!(err, MapError::Overlap { side: "document", path: "X.Items[*].Nm".into() });

        let err = PathMap::builder()
            .expand("X.Items", "Items", |b| b.flat("Nm", "Name"))
            .flat("X.Other", "Items[1].Name")
            .build()
            .unwrap_err();
        assert_eq!(err, MapError::Overlap { side: "model", path: "Items[1].Name".into() });

        let ok = PathMap::builder()
            .flat("X.Items[0].Id", "FirstId")
            .expand("X.Items", "Items", |b| b.flat("Nm", "Name").expand("Sub", "Subs", |c| c.flat("Nm", "Name")))
            .build();
        assert!(ok.is_ok(), "{ok:?}");
    }

    #[test]
    fn extend_copies_base_rules() {
        let base = PathMap::builder().flat("Doc.A", "A").build().unwrap();
        let map = PathMap::builder().extend(&base).flat("Doc.B", "B").build().unwrap();
        assert_eq!(map.rules().len(), 2);
    }
}
