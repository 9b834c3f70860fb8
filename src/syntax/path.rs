//! Path segment tokens produced by the upstream `$select`/`$expand` tokenizer.

use crate::base::Name;

/// Whether a token came from an ordinary identifier or a `$`-prefixed system segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathTokenKind {
    NonSystem,
    System,
}

/// A `name=value` pair attached to a segment, e.g. a key predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedValue {
    pub name: Option<Name>,
    pub value: Name,
}

/// One segment of a path, linked to the rest of the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegmentToken {
    kind: PathTokenKind,
    identifier: Name,
    named_values: Option<Vec<NamedValue>>,
    next: Option<Box<PathSegmentToken>>,
}

impl PathSegmentToken {
    /// An ordinary segment such as `Name` or `NS.Employee`.
    pub fn non_system(
        identifier: impl Into<Name>,
        named_values: Option<Vec<NamedValue>>,
        next: Option<PathSegmentToken>,
    ) -> Self {
        Self {
            kind: PathTokenKind::NonSystem,
            identifier: identifier.into(),
            named_values,
            next: next.map(Box::new),
        }
    }

    /// A system segment such as `$ref` or `$count`.
    pub fn system(identifier: impl Into<Name>, next: Option<PathSegmentToken>) -> Self {
        Self {
            kind: PathTokenKind::System,
            identifier: identifier.into(),
            named_values: None,
            next: next.map(Box::new),
        }
    }

    /// Build a chain from already split segments; `$`-prefixed ones become system tokens.
    ///
    /// Returns `None` for an empty iterator.
    pub fn chain<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<Name>,
    {
        let mut next: Option<PathSegmentToken> = None;
        for segment in segments.into_iter().rev() {
            let identifier: Name = segment.into();
            next = Some(if identifier.starts_with('$') {
                Self::system(identifier, next)
            } else {
                Self::non_system(identifier, None, next)
            });
        }
        next
    }

    pub fn kind(&self) -> PathTokenKind {
        self.kind
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn named_values(&self) -> Option<&[NamedValue]> {
        self.named_values.as_deref()
    }

    pub fn next_token(&self) -> Option<&PathSegmentToken> {
        self.next.as_deref()
    }

    /// True when the identifier is written like a type or container name (`NS.Type`).
    ///
    /// System segments never qualify.
    pub fn is_namespace_or_container_qualified(&self) -> bool {
        self.kind == PathTokenKind::NonSystem && self.identifier.contains('.')
    }

    /// Iterate this token and every token after it.
    pub fn iter(&self) -> impl Iterator<Item = &PathSegmentToken> {
        std::iter::successors(Some(self), |token| token.next_token())
    }
}

impl std::fmt::Display for PathSegmentToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for token in self.iter() {
            if !first {
                f.write_str("/")?;
            }
            f.write_str(token.identifier())?;
            first = false;
        }
        Ok(())
    }
}
