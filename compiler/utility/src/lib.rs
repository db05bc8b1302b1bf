//! Utility functionality and definitions.

use std::fmt;

pub use atom::Atom;
pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub mod atom;

pub type Str = std::borrow::Cow<'static, str>;

pub type SmallVec<T, const N: usize> = smallvec::SmallVec<T, N>;

#[macro_export]
macro_rules! obtain {
    ($expr:expr, $pat:pat $( if $guard:expr )? => $mapping:expr $(,)?) => {
        match $expr {
            $pat $( if $guard )? => Some($mapping),
            _ => None,
        }
    };
}

#[macro_export]
macro_rules! quoted {
    ($code:expr) => {
        concat!("\u{2018}", $code, "\u{2019}")
    };
}

pub trait QuoteExt {
    fn quote(self) -> String;
}

impl<D: fmt::Display> QuoteExt for D {
    fn quote(self) -> String {
        format!("\u{2018}{self}\u{2019}")
    }
}

/// Render the difference between two texts, for test failure output.
pub fn difference(original: &str, edit: &str, split: &str) -> String {
    use colored::Colorize;
    use difference::{Changeset, Difference};
    use std::io::Write;

    let mut buffer = Vec::new();

    // the provided Display implementation for Changesets is unreadable when whitespace differs
    for difference in Changeset::new(original, edit, split).diffs {
        match difference {
            Difference::Same(lines) => {
                for line in lines.lines() {
                    writeln!(buffer, "{} {line}", " ".on_bright_white()).unwrap();
                }
            }
            Difference::Add(lines) => {
                for line in lines.lines().chain(lines.is_empty().then_some("")) {
                    writeln!(buffer, "{} {}", "+".black().on_green(), line.green()).unwrap();
                }
            }
            Difference::Rem(lines) => {
                for line in lines.lines().chain(lines.is_empty().then_some("")) {
                    writeln!(buffer, "{} {}", "-".black().on_red(), line.red()).unwrap();
                }
            }
        }
    }

    String::from_utf8(buffer).unwrap()
}

pub trait ListingExt {
    fn list(self, conjunction: Conjunction) -> String;
}

impl<I> ListingExt for I
where
    I: Iterator + Clone,
    I::Item: Clone + fmt::Display,
{
    fn list(self, conjunction: Conjunction) -> String {
        let mut this = self.peekable();
        let mut first = true;
        let mut result = String::new();

        while let Some(item) = this.next() {
            if !first {
                if this.peek().is_some() {
                    result += ", ";
                } else {
                    use std::fmt::Write;
                    write!(result, " {conjunction} ").unwrap();
                }
            }

            result += &item.to_string();
            first = false;
        }

        result
    }
}

#[derive(Clone, Copy)]
pub enum Conjunction {
    And,
    Or,
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "and",
            Self::Or => "or",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn listing_one_element() {
        assert_eq!(std::iter::once(1).list(Conjunction::Or), "1");
    }

    #[test]
    fn listing_two_elements() {
        assert_eq!(
            [false, true].into_iter().list(Conjunction::And),
            "false and true"
        );
    }

    #[test]
    fn listing_three_elements() {
        assert_eq!([1, 2, 3].into_iter().list(Conjunction::Or), "1, 2 or 3");
    }
}
