use crate::{Span, Spanning};

/// Something with a source location and attributes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Item<Bare, Attributes> {
    pub bare: Bare,
    pub span: Span,
    pub attributes: Attributes,
}

impl<Bare, Attributes> Item<Bare, Attributes> {
    pub const fn new(attributes: Attributes, span: Span, bare: Bare) -> Self {
        Self {
            bare,
            span,
            attributes,
        }
    }

    /// An item with default attributes.
    pub fn common(span: Span, bare: Bare) -> Self
    where
        Attributes: Default,
    {
        Self::new(Attributes::default(), span, bare)
    }

    pub fn map<U>(self, mapper: impl FnOnce(Bare) -> U) -> Item<U, Attributes> {
        Item {
            bare: mapper(self.bare),
            span: self.span,
            attributes: self.attributes,
        }
    }
}

impl<Bare, Attributes> Spanning for Item<Bare, Attributes> {
    fn span(&self) -> Span {
        self.span
    }
}
