use span::Spanned;
use utility::Atom;

/// A literal.
pub type Lit = Spanned<BareLit>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BareLit {
    Unit,
    Num(i64),
    Bool(bool),
    Char(char),
    Text(Atom),
}
