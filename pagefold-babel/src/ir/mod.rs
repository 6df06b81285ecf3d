//! Intermediate Representation (IR) for pagefold documents.
//!
//! This module defines the format-agnostic element tree that every reader
//! produces and every writer consumes.

pub mod nodes;

pub use nodes::{
    AttributeValue, Attributes, CodeBlock, Document, Element, ElementKind, Heading, Image, Link,
    List, ListItem, Paragraph, Span,
};
