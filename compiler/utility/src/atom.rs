//! A global string interner.

use crate::HashMap;
use std::{
    fmt,
    sync::{LazyLock, Mutex},
};

/// An interned string.
///
/// Cheap to copy, compare and hash. The underlying text is obtained with
/// [`Self::to_str`]. Interned strings are never deallocated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom(u32);

impl Atom {
    pub fn to_str(self) -> &'static str {
        Interner::the().lock().unwrap().get(self)
    }
}

impl From<&str> for Atom {
    fn from(value: &str) -> Self {
        Interner::the().lock().unwrap().intern_borrowed(value)
    }
}

impl From<String> for Atom {
    fn from(value: String) -> Self {
        Interner::the().lock().unwrap().intern_owned(value)
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

struct Interner {
    atoms: HashMap<&'static str, Atom>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn the() -> &'static Mutex<Self> {
        static SELF: LazyLock<Mutex<Interner>> = LazyLock::new(|| {
            Mutex::new(Interner {
                atoms: HashMap::default(),
                strings: Vec::new(),
            })
        });

        &SELF
    }

    fn intern_borrowed(&mut self, value: &str) -> Atom {
        if let Some(&atom) = self.atoms.get(value) {
            return atom;
        }

        self.insert(Box::leak(Box::from(value)))
    }

    fn intern_owned(&mut self, value: String) -> Atom {
        if let Some(&atom) = self.atoms.get(&*value) {
            return atom;
        }

        self.insert(String::leak(value))
    }

    fn insert(&mut self, value: &'static str) -> Atom {
        let atom = Atom(self.strings.len().try_into().unwrap());
        self.strings.push(value);
        self.atoms.insert(value, atom);
        atom
    }

    fn get(&self, atom: Atom) -> &'static str {
        self.strings[atom.0 as usize]
    }
}

#[cfg(test)]
mod test {
    use super::Atom;

    #[test]
    fn interning_is_stable() {
        let first = Atom::from("alpha");
        let second = Atom::from("alpha".to_string());
        assert_eq!(first, second);
        assert_eq!(first.to_str(), "alpha");
    }

    #[test]
    fn distinct_strings_distinct_atoms() {
        assert_ne!(Atom::from("alpha"), Atom::from("beta"));
    }
}
