//! Vector-drawable documents to drawing operations.
//!
//! Path data is parsed once into [`PathSegment`]s by a small parser
//! combinator engine. Rendering evaluates those segments for a requested
//! target size, applies each group's transform, and delivers move, line,
//! cubic and close operations to a [`PathSink`].
//!
//! ```
//! use vecdraw::{Element, Size, VectorDocument};
//!
//! let root = Element::new("vector")
//!     .with_attribute("android:viewportWidth", "24")
//!     .with_attribute("android:viewportHeight", "24")
//!     .with_child(Element::new("path").with_attribute("android:pathData", "M2,2 h20 v20 h-20z"));
//!
//! let document = VectorDocument::from_element(&root)?;
//! let paths = document.create_paths(Size::new(48.0, 48.0))?;
//! assert_eq!(paths[0].to_svg_data(), "M4 4 L44 4 L44 44 L4 44 Z");
//! # Ok::<(), miette::Report>(())
//! ```

pub mod ast;
pub mod combinator;
pub mod document;
pub mod errors;
pub mod log;
pub mod parse;
pub mod render;
pub mod types;

pub use ast::{Evaluate, Mode, PathSegment};
pub use document::{ClipPath, Element, Group, PathEntity, PathStyle, VectorDocument};
pub use errors::{DocumentError, ParseError, RenderError};
pub use parse::path_data;
pub use render::{DrawOp, GroupTransform, PathKind, PathSink, PriorContext, RenderedPath, evaluate};
pub use types::{Dimension, Scale, Size, Unit};
