use std::fmt;
use utility::{Atom, SmallVec};

/// A possibly qualified name: an identifier followed by a path of segments.
///
/// In `pair.0.swap`, `pair` is the *identifier* and `0` and `swap` are the
/// path *segments*.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Name {
    pub ident: Atom,
    pub path: SmallVec<Seg, 1>,
}

impl Name {
    pub fn new(ident: Atom, path: SmallVec<Seg, 1>) -> Self {
        Self { ident, path }
    }

    pub fn plain(ident: Atom) -> Self {
        Self {
            ident,
            path: SmallVec::new(),
        }
    }

    /// Split the path into the longest leading run of identifier segments and
    /// the remainder starting at the first integer segment.
    pub fn slice(&self) -> (Vec<Atom>, &[Seg]) {
        let cut = self
            .path
            .iter()
            .position(|seg| matches!(seg, Seg::Index(_)))
            .unwrap_or(self.path.len());

        let idents = self.path[..cut]
            .iter()
            .map(|seg| match seg {
                Seg::Ident(ident) => *ident,
                Seg::Index(_) => unreachable!(),
            })
            .collect();

        (idents, &self.path[cut..])
    }
}

impl From<Atom> for Name {
    fn from(ident: Atom) -> Self {
        Self::plain(ident)
    }
}

/// A path segment: a field name or a tuple index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Seg {
    Ident(Atom),
    Index(i64),
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ident)?;
        for seg in &self.path {
            write!(f, ".{seg}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(ident) => write!(f, "{ident}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}
