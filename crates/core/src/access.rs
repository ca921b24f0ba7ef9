//! Dynamic field access over typed records.
//!
//! Reads are fail-soft: a `None` optional along the way is reported as
//! [`AccessError::Absent`]. Writes auto-vivify: mutable access to an empty
//! optional fills it with a default, and sequences grow up to the addressed index,
//! by at most [`MAX_GROWTH`] elements per write.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{AccessError, AccessResult, Kind, Path, Rejection, Value};

/// Anything that can sit at a path: a scalar, a record, an optional or a sequence.
pub trait Field {
    fn node(&self) -> Node<'_>;
    fn node_mut(&mut self) -> NodeMut<'_>;

    /// Facet check for restricted types (length, pattern, code set).
    fn check(&self) -> Result<(), Rejection> { Ok(()) }
}

pub enum Node<'a> {
    Scalar(&'a dyn Scalar),
    Record(&'a dyn Record),
    Optional(Option<&'a dyn Field>),
    Sequence(&'a dyn Sequence),
}

/// Mutable view. Optionals never appear here: they are filled and see-through.
pub enum NodeMut<'a> {
    Scalar(&'a mut dyn Scalar),
    Record(&'a mut dyn Record),
    Sequence(&'a mut dyn Sequence),
}

pub trait Scalar {
    fn value(&self) -> Value;
    fn assign(&mut self, value: Value) -> Result<(), Rejection>;
}

/// A named-field record. `shape` is the type name, used in logs.
pub trait Record {
    fn shape(&self) -> &'static str;
    fn field_names(&self) -> &'static [&'static str];
    fn field(&self, name: &str) -> Option<&dyn Field>;
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Field>;
}

/// Most default elements a single write may append to a sequence.
pub const MAX_GROWTH: usize = 1024;

pub trait Sequence {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool { self.len() == 0 }
    fn item(&self, index: usize) -> Option<&dyn Field>;
    /// Grow with defaults up to `index` and return that element. `None` when
    /// reaching `index` would append more than [`MAX_GROWTH`] elements.
    fn vivify(&mut self, index: usize) -> Option<&mut dyn Field>;
}

impl<T: Field + Default> Field for Option<T> {
    fn node(&self) -> Node<'_> { Node::Optional(self.as_ref().map(|t| t as &dyn Field)) }
    fn node_mut(&mut self) -> NodeMut<'_> { self.get_or_insert_with(T::default).node_mut() }
    fn check(&self) -> Result<(), Rejection> {
        match self { Some(t) => t.check(), None => Ok(()) }
    }
}

impl<T: Field + Default> Field for Vec<T> {
    fn node(&self) -> Node<'_> { Node::Sequence(self) }
    fn node_mut(&mut self) -> NodeMut<'_> { NodeMut::Sequence(self) }
}

impl<T: Field + Default> Sequence for Vec<T> {
    fn len(&self) -> usize { Vec::len(self) }
    fn item(&self, index: usize) -> Option<&dyn Field> { self.get(index).map(|t| t as &dyn Field) }
    fn vivify(&mut self, index: usize) -> Option<&mut dyn Field> {
        if index >= self.len() {
            if index - self.len() >= MAX_GROWTH { return None; }
            self.resize_with(index + 1, T::default);
        }
        self.get_mut(index).map(|t| t as &mut dyn Field)
    }
}

macro_rules! scalar_field {
    ($ty:ty, $kind:ident, |$v:ident| $to:expr, { $($pat:pat => $conv:expr),+ $(,)? }) => {
        impl Scalar for $ty {
            fn value(&self) -> Value { let $v = self; $to }
            fn assign(&mut self, value: Value) -> Result<(), Rejection> {
                *self = match value {
                    $($pat => $conv,)+
                    other => return Err(Rejection::Kind { expected: Kind::$kind, found: other.kind() }),
                };
                Ok(())
            }
        }

        impl Field for $ty {
            fn node(&self) -> Node<'_> { Node::Scalar(self) }
            fn node_mut(&mut self) -> NodeMut<'_> { NodeMut::Scalar(self) }
        }
    };
}

scalar_field!(String, Text, |v| Value::Text(v.clone()), { Value::Text(s) => s });
scalar_field!(bool, Bool, |v| Value::Bool(*v), { Value::Bool(b) => b });
scalar_field!(i64, Int, |v| Value::Int(*v), { Value::Int(n) => n });
scalar_field!(f64, Decimal, |v| Value::Decimal(*v), { Value::Decimal(d) => d, Value::Int(n) => n as f64 });
scalar_field!(NaiveDate, Date, |v| Value::Date(*v), { Value::Date(d) => d });
scalar_field!(DateTime<Utc>, DateTime, |v| Value::DateTime(*v), { Value::DateTime(t) => t });

/// Unwrap present optionals; a `None` is an absence at `depth`.
fn present<'a>(mut field: &'a dyn Field, path: &Path, depth: usize) -> AccessResult<&'a dyn Field> {
    loop {
        match field.node() {
            Node::Optional(Some(inner)) => field = inner,
            Node::Optional(None) => return Err(AccessError::Absent { path: path.prefix(depth) }),
            _ => return Ok(field),
        }
    }
}

/// Borrow the field addressed by `path`.
pub fn lookup<'a>(root: &'a dyn Record, path: &Path) -> AccessResult<&'a dyn Field> {
    let segments = path.segments();
    let mut record = root;
    for (depth, seg) in segments.iter().enumerate() {
        let at = depth + 1;
        let mut field = record
            .field(&seg.name)
            .ok_or_else(|| AccessError::FieldNotFound { path: path.prefix(at) })?;
        field = present(field, path, at)?;
        if let Some(index) = seg.index {
            let seq = match field.node() {
                Node::Sequence(seq) => seq,
                _ => return Err(AccessError::NotIndexable { path: path.prefix(at) }),
            };
            field = seq
                .item(index)
                .ok_or_else(|| AccessError::IndexOutOfRange { path: path.prefix(at), len: seq.len() })?;
            field = present(field, path, at)?;
        }
        if at == segments.len() { return Ok(field); }
        record = match field.node() {
            Node::Record(r) => r,
            _ => return Err(AccessError::FieldNotFound { path: path.prefix(at + 1) }),
        };
    }
    Err(AccessError::InvalidPath(path.to_string()))
}

/// Read the scalar at `path`.
pub fn get(root: &dyn Record, path: &Path) -> AccessResult<Value> {
    match lookup(root, path)?.node() {
        Node::Scalar(s) => Ok(s.value()),
        _ => Err(AccessError::NotScalar { path: path.to_string() }),
    }
}

/// Number of elements in the repeated field at `path`.
pub fn count(root: &dyn Record, path: &Path) -> AccessResult<usize> {
    match lookup(root, path)?.node() {
        Node::Sequence(seq) => Ok(seq.len()),
        _ => Err(AccessError::NotIndexable { path: path.to_string() }),
    }
}

/// Write `value` at `path`, creating intermediate optionals and sequence elements.
pub fn set(root: &mut dyn Record, path: &Path, value: Value) -> AccessResult<()> {
    let segments = path.segments();
    let last = segments.len() - 1;
    let mut record = root;
    for (depth, seg) in segments.iter().enumerate() {
        let at = depth + 1;
        let mut field = record
            .field_mut(&seg.name)
            .ok_or_else(|| AccessError::FieldNotFound { path: path.prefix(at) })?;
        if let Some(index) = seg.index {
            field = match field.node_mut() {
                NodeMut::Sequence(seq) => {
                    let len = seq.len();
                    seq.vivify(index).ok_or_else(|| AccessError::IndexOutOfRange { path: path.prefix(at), len })?
                }
                _ => return Err(AccessError::NotIndexable { path: path.prefix(at) }),
            };
        }
        if depth == last {
            return match field.node_mut() {
                NodeMut::Scalar(s) => s.assign(value).map_err(|r| AccessError::rejected(path.to_string(), r)),
                _ => Err(AccessError::NotScalar { path: path.to_string() }),
            };
        }
        record = match field.node_mut() {
            NodeMut::Record(r) => r,
            _ => return Err(AccessError::FieldNotFound { path: path.prefix(at + 1) }),
        };
    }
    Err(AccessError::InvalidPath(path.to_string()))
}

/// Emptiness as seen by the required-field gate.
pub fn is_blank(field: &dyn Field) -> bool {
    match field.node() {
        Node::Scalar(s) => s.value().is_empty(),
        Node::Optional(inner) => inner.map_or(true, is_blank),
        Node::Sequence(seq) => seq.is_empty(),
        Node::Record(r) => r.field_names().iter().all(|n| r.field(n).map_or(true, is_blank)),
    }
}

/// Run every field's facet check, reporting the first violation with its path.
pub fn check_tree(root: &dyn Record) -> AccessResult<()> {
    fn walk(field: &dyn Field, at: &str) -> AccessResult<()> {
        field.check().map_err(|r| AccessError::rejected(at.to_string(), r))?;
        match field.node() {
            Node::Scalar(_) | Node::Optional(None) => Ok(()),
            Node::Optional(Some(inner)) => walk(inner, at),
            Node::Record(r) => walk_record(r, at),
            Node::Sequence(seq) => {
                for i in 0..seq.len() {
                    if let Some(item) = seq.item(i) { walk(item, &format!("{}[{}]", at, i))?; }
                }
                Ok(())
            }
        }
    }
    fn walk_record(r: &dyn Record, base: &str) -> AccessResult<()> {
        for name in r.field_names() {
            let at = if base.is_empty() { name.to_string() } else { format!("{}.{}", base, name) };
            if let Some(f) = r.field(name) { walk(f, &at)?; }
        }
        Ok(())
    }
    walk_record(root, "")
}
