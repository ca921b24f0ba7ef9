//! Copy loops between documents and models, plus the required-field gate.

use tracing::{debug, warn};

use isomap_core::{access, Path, Record};

use crate::remap::FlatEntry;
use crate::{EngineError, EngineResult};

/// Fail on the first required model field that is empty.
///
/// Names are model paths (`MessageId`, `MessagePagination`). An absent optional
/// counts as empty; a name that does not exist on the model is a configuration error.
pub fn check_required(model: &dyn Record, required: &[Path]) -> EngineResult<()> {
    for name in required {
        let blank = match access::lookup(model, name) {
            Ok(field) => access::is_blank(field),
            Err(e) if e.is_absence() => true,
            Err(e) => return Err(EngineError::Access(e)),
        };
        if blank {
            return Err(EngineError::MissingRequiredField(name.to_string()));
        }
    }
    Ok(())
}

/// Build a model from a document using entries resolved in the `ToModel` direction.
///
/// Absent or unresolvable document paths are skipped. A value the model refuses is fatal.
pub fn to_model<M: Record + Default>(document: &dyn Record, entries: &[FlatEntry]) -> EngineResult<M> {
    let mut model = M::default();
    let mut copied = 0usize;
    for entry in entries {
        let value = match access::get(document, &entry.source) {
            Ok(v) => v,
            Err(e) if e.is_absence() => continue,
            Err(e) => {
                warn!(shape = document.shape(), path = %entry.source, error = %e, "document path does not resolve; skipped");
                continue;
            }
        };
        access::set(&mut model, &entry.target, value)
            .map_err(|source| EngineError::Field { field: entry.target.to_string(), source })?;
        copied += 1;
    }
    debug!(shape = document.shape(), copied, entries = entries.len(), "document copied into model");
    Ok(model)
}

/// Write model values into `document` using entries resolved in the `ToDocument` direction.
///
/// Empty and absent model values are skipped. Any other failure aborts and names the model field;
/// the caller must then discard the partially written document.
pub fn fill_document(model: &dyn Record, document: &mut dyn Record, entries: &[FlatEntry]) -> EngineResult<()> {
    let mut copied = 0usize;
    for entry in entries {
        let value = match access::get(model, &entry.source) {
            Ok(v) if v.is_empty() => continue,
            Ok(v) => v,
            Err(e) if e.is_absence() => continue,
            Err(source) => return Err(EngineError::Field { field: entry.source.to_string(), source }),
        };
        access::set(document, &entry.target, value)
            .map_err(|source| EngineError::Field { field: entry.source.to_string(), source })?;
        copied += 1;
    }
    debug!(shape = document.shape(), copied, entries = entries.len(), "model copied into document");
    Ok(())
}
