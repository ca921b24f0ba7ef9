//! Dotted record paths with optional `[index]` segments, e.g. `Rpt[0].Bal`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::AccessError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub name: String,
    pub index: Option<usize>,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), index: None } }
    pub fn indexed(name: impl Into<String>, index: usize) -> Self { Self { name: name.into(), index: Some(index) } }

    fn parse(seg: &str) -> Option<Segment> {
        if seg.is_empty() { return None; }
        let (name, index) = match seg.find('[') {
            Some(open) => {
                // a single trailing [digits]
                let inner = seg[open + 1..].strip_suffix(']')?;
                if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) { return None; }
                (&seg[..open], Some(inner.parse::<usize>().ok()?))
            }
            None => (seg, None),
        };
        if name.is_empty() { return None; }
        if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-') { return None; }
        Some(Segment { name: name.to_string(), index })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.name, i),
            None => f.write_str(&self.name),
        }
    }
}

/// A non-empty sequence of segments addressing one field from a record root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: SmallVec<[Segment; 8]>,
}

impl Path {
    pub fn parse(raw: &str) -> Result<Path, AccessError> {
        let invalid = || AccessError::InvalidPath(raw.to_string());
        let s = raw.strip_prefix('.').unwrap_or(raw);
        if s.is_empty() { return Err(invalid()); }
        let mut segments = SmallVec::new();
        for seg in s.split('.') {
            segments.push(Segment::parse(seg).ok_or_else(invalid)?);
        }
        Ok(Path { segments })
    }

    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Option<Path> {
        let segments: SmallVec<[Segment; 8]> = segments.into_iter().collect();
        if segments.is_empty() { None } else { Some(Path { segments }) }
    }

    pub fn segments(&self) -> &[Segment] { &self.segments }

    pub fn len(&self) -> usize { self.segments.len() }

    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    pub fn last(&self) -> &Segment {
        // non-empty by construction
        &self.segments[self.segments.len() - 1]
    }

    /// `self` followed by `child`.
    pub fn join(&self, child: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        Path { segments }
    }

    /// Same path with the last segment addressing element `index`.
    pub fn with_index(&self, index: usize) -> Path {
        let mut segments = self.segments.clone();
        let last = segments.len() - 1;
        segments[last].index = Some(index);
        Path { segments }
    }

    /// Rendered form of the first `n` segments, used in error messages.
    pub fn prefix(&self, n: usize) -> String {
        let mut out = String::new();
        for (i, seg) in self.segments.iter().take(n).enumerate() {
            if i > 0 { out.push('.'); }
            out.push_str(&seg.to_string());
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix(self.segments.len()))
    }
}

impl FromStr for Path {
    type Err = AccessError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Path::parse(s) }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Path::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_simple_paths() {
        let p = Path::parse("AcctRptgReq.RptgReq[0].Acct.Id").unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(p.segments()[1], Segment::indexed("RptgReq", 0));
        assert_eq!(p.to_string(), "AcctRptgReq.RptgReq[0].Acct.Id");
        assert_eq!(Path::parse(".GrpHdr.MsgId").unwrap().to_string(), "GrpHdr.MsgId");
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        for raw in ["", ".", "a..b", "a.*", "a[0][1]", "a[]", "a[x]", "[0]", "a[0]b", "a b"] {
            assert!(Path::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn join_and_index_build_expanded_paths() {
        let parent = Path::parse("Rpt[0].Bal").unwrap();
        let child = Path::parse("Amt.Ccy").unwrap();
        assert_eq!(parent.with_index(2).join(&child).to_string(), "Rpt[0].Bal[2].Amt.Ccy");
        assert_eq!(parent.prefix(1), "Rpt[0]");
    }

    #[test]
    fn path_serializes_as_string() {
        let p: Path = serde_json::from_str("\"A.B[1]\"").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"A.B[1]\"");
        assert!(serde_json::from_str::<Path>("\"A..B\"").is_err());
    }
}
