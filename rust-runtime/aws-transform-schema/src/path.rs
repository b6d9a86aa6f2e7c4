/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Root,
    Field(&'a str),
    Index(usize),
    Key(&'a str),
}

/// Location of a value inside a request or response tree, e.g. `Tags[2].Key`.
///
/// Paths borrow from their parent on the stack, so building one while recursing costs nothing
/// until it is rendered into an error.
#[derive(Debug, Clone, Copy)]
pub struct FieldPath<'a> {
    parent: Option<&'a FieldPath<'a>>,
    segment: Segment<'a>,
    depth: usize,
}

impl<'a> FieldPath<'a> {
    /// The top-level structure.
    pub fn root() -> FieldPath<'static> {
        FieldPath {
            parent: None,
            segment: Segment::Root,
            depth: 0,
        }
    }

    /// A named field of the structure at `self`.
    pub fn field<'b>(&'b self, name: &'b str) -> FieldPath<'b> {
        self.child(Segment::Field(name))
    }

    /// The element at zero-based `index` of the list at `self`.
    pub fn index(&self, index: usize) -> FieldPath<'_> {
        self.child(Segment::Index(index))
    }

    /// The entry for `key` of the map at `self`.
    pub fn key<'b>(&'b self, key: &'b str) -> FieldPath<'b> {
        self.child(Segment::Key(key))
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn child<'b>(&'b self, segment: Segment<'b>) -> FieldPath<'b> {
        FieldPath {
            parent: Some(self),
            segment,
            depth: self.depth + 1,
        }
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            parent.fmt(f)?;
        }
        match self.segment {
            Segment::Root => Ok(()),
            Segment::Field(name) if self.depth == 1 => write!(f, "{}", name),
            Segment::Field(name) => write!(f, ".{}", name),
            Segment::Index(index) => write!(f, "[{}]", index),
            Segment::Key(key) => write!(f, "[{:?}]", key),
        }
    }
}

#[cfg(test)]
mod test {
    use super::FieldPath;

    #[test]
    fn display() {
        let root = FieldPath::root();
        assert_eq!(root.to_string(), "");
        let tags = root.field("Tags");
        let second = tags.index(1);
        let key = second.field("Key");
        assert_eq!(key.to_string(), "Tags[1].Key");
        assert_eq!(key.depth(), 3);
        let attributes = root.field("Attributes");
        assert_eq!(attributes.key("Policy").to_string(), "Attributes[\"Policy\"]");
    }
}
