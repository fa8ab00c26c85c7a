//! Vector document model
//!
//! The XML reader is not part of this crate. Callers hand over an already
//! extracted [`Element`] tree and get back a resolved [`VectorDocument`]
//! whose path data has been parsed, or the first error found.

use std::fmt;

use glam::dvec2;

use crate::ast::PathSegment;
use crate::errors::{DocumentError, RenderError};
use crate::log::{debug, warn};
use crate::parse;
use crate::render::{self, GroupTransform, RenderedPath, defaults};
use crate::types::{Dimension, Scale, Size};

// ============================================================================
// Element tree
// ============================================================================

/// One element of the source document, as extracted by an XML reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    /// Attributes in source order; names may carry a namespace prefix
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            ..Element::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Value of attribute `name`, ignoring any namespace prefix, so
    /// `android:pathData` and `pathData` both match `pathData`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find_map(|(key, value)| {
            let local = key.rsplit_once(':').map_or(key.as_str(), |(_, local)| local);
            (local == name).then_some(value.as_str())
        })
    }

    fn describe(&self) -> String {
        match self.attribute("name") {
            Some(name) => format!("<{} name=\"{}\">", self.tag, name),
            None => format!("<{}>", self.tag),
        }
    }
}

// ============================================================================
// Styles
// ============================================================================

/// Winding rule used to fill a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillType {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl FillType {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "nonZero" => Some(FillType::NonZero),
            "evenOdd" => Some(FillType::EvenOdd),
            _ => None,
        }
    }
}

impl LineCap {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

impl LineJoin {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "miter" => Some(LineJoin::Miter),
            "round" => Some(LineJoin::Round),
            "bevel" => Some(LineJoin::Bevel),
            _ => None,
        }
    }
}

/// Paint attributes of a path. Colors are kept as written; resolving them
/// is up to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub fill_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: f64,
    pub fill_alpha: f64,
    pub stroke_alpha: f64,
    pub fill_type: FillType,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        PathStyle {
            fill_color: None,
            stroke_color: None,
            stroke_width: defaults::STROKE_WIDTH,
            fill_alpha: defaults::FILL_ALPHA,
            stroke_alpha: defaults::STROKE_ALPHA,
            fill_type: FillType::default(),
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: defaults::MITER_LIMIT,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A drawn path and its parsed segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntity {
    pub name: Option<String>,
    pub style: PathStyle,
    pub segments: Vec<PathSegment>,
}

/// A clip outline applying to the rest of its group.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPath {
    pub name: Option<String>,
    pub segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub name: Option<String>,
    pub transform: GroupTransform,
    pub clip_paths: Vec<ClipPath>,
    pub paths: Vec<PathEntity>,
    pub groups: Vec<Group>,
}

impl Group {
    fn is_empty(&self) -> bool {
        self.clip_paths.is_empty() && self.paths.is_empty() && self.groups.is_empty()
    }
}

/// A resolved vector document.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    pub name: Option<String>,
    /// Coordinate space of all path data; strictly positive
    pub viewport: Size,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub alpha: f64,
    /// Root groups in document order. Paths written directly under the root
    /// are wrapped in unnamed identity groups.
    pub groups: Vec<Group>,
}

impl VectorDocument {
    /// Build a document from a `vector` element.
    ///
    /// Either the whole tree resolves or the first error is returned.
    pub fn from_element(root: &Element) -> Result<VectorDocument, DocumentError> {
        if root.tag != "vector" {
            return Err(DocumentError::UnexpectedRoot {
                tag: root.tag.clone(),
            });
        }

        let viewport = Size::new(
            required_number(root, "viewportWidth")?,
            required_number(root, "viewportHeight")?,
        );
        if !viewport.is_positive() {
            return Err(DocumentError::InvalidViewport {
                width: viewport.w,
                height: viewport.h,
            });
        }

        let mut groups = Vec::new();
        let mut loose = Group::default();
        for child in &root.children {
            match child.tag.as_str() {
                "group" => {
                    if !loose.is_empty() {
                        groups.push(std::mem::take(&mut loose));
                    }
                    groups.push(group(child)?);
                }
                "path" => loose.paths.push(path_entity(child)?),
                "clip-path" => loose.clip_paths.push(clip_path(child)?),
                _ => {
                    warn!(element = %child.tag, "skipping unsupported element");
                }
            }
        }
        if !loose.is_empty() {
            groups.push(loose);
        }

        let document = VectorDocument {
            name: root.attribute("name").map(str::to_string),
            viewport,
            width: optional_dimension(root, "width")?,
            height: optional_dimension(root, "height")?,
            alpha: number_or(root, "alpha", defaults::DOCUMENT_ALPHA)?,
            groups,
        };
        debug!(viewport = %document.viewport, groups = document.groups.len(), "built vector document");
        Ok(document)
    }

    /// Declared width and height, when both are given.
    pub fn intrinsic_size(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(Size::new(w.value, h.value)),
            _ => None,
        }
    }

    /// Ratio that maps the viewport onto `target`.
    pub fn scale_for(&self, target: Size) -> Result<Scale, RenderError> {
        Scale::between(self.viewport, target).map_err(|source| RenderError::InvalidTargetSize {
            width: target.w,
            height: target.h,
            source,
        })
    }

    /// Render every path and clip path for a target of the given size.
    pub fn create_paths(&self, target: Size) -> Result<Vec<RenderedPath>, RenderError> {
        Ok(self.create_paths_scaled(self.scale_for(target)?))
    }

    /// Render every path and clip path with an explicit viewport-to-target
    /// ratio.
    pub fn create_paths_scaled(&self, scale: Scale) -> Vec<RenderedPath> {
        render::render_groups(&self.groups, scale)
    }
}

impl fmt::Display for VectorDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vector {}", self.viewport)?;
        if let Some(name) = &self.name {
            write!(f, " `{name}`")?;
        }
        Ok(())
    }
}

// ============================================================================
// Element conversion
// ============================================================================

fn group(element: &Element) -> Result<Group, DocumentError> {
    let transform = GroupTransform {
        pivot: dvec2(
            number_or(element, "pivotX", defaults::PIVOT)?,
            number_or(element, "pivotY", defaults::PIVOT)?,
        ),
        rotation: number_or(element, "rotation", defaults::ROTATION)?,
        scale: dvec2(
            number_or(element, "scaleX", defaults::SCALE)?,
            number_or(element, "scaleY", defaults::SCALE)?,
        ),
        translation: dvec2(
            number_or(element, "translateX", defaults::TRANSLATION)?,
            number_or(element, "translateY", defaults::TRANSLATION)?,
        ),
    };

    let mut group = Group {
        name: element.attribute("name").map(str::to_string),
        transform,
        ..Group::default()
    };
    for child in &element.children {
        match child.tag.as_str() {
            "group" => group.groups.push(self::group(child)?),
            "path" => group.paths.push(path_entity(child)?),
            "clip-path" => group.clip_paths.push(clip_path(child)?),
            _ => {
                warn!(element = %child.tag, "skipping unsupported element");
            }
        }
    }
    Ok(group)
}

fn path_entity(element: &Element) -> Result<PathEntity, DocumentError> {
    let style = PathStyle {
        fill_color: element.attribute("fillColor").map(str::to_string),
        stroke_color: element.attribute("strokeColor").map(str::to_string),
        stroke_width: number_or(element, "strokeWidth", defaults::STROKE_WIDTH)?,
        fill_alpha: number_or(element, "fillAlpha", defaults::FILL_ALPHA)?,
        stroke_alpha: number_or(element, "strokeAlpha", defaults::STROKE_ALPHA)?,
        fill_type: keyword_or(element, "fillType", FillType::from_keyword, "nonZero, evenOdd")?,
        line_cap: keyword_or(element, "strokeLineCap", LineCap::from_keyword, "butt, round, square")?,
        line_join: keyword_or(element, "strokeLineJoin", LineJoin::from_keyword, "miter, round, bevel")?,
        miter_limit: number_or(element, "strokeMiterLimit", defaults::MITER_LIMIT)?,
    };
    Ok(PathEntity {
        name: element.attribute("name").map(str::to_string),
        style,
        segments: segments(element)?,
    })
}

fn clip_path(element: &Element) -> Result<ClipPath, DocumentError> {
    Ok(ClipPath {
        name: element.attribute("name").map(str::to_string),
        segments: segments(element)?,
    })
}

fn segments(element: &Element) -> Result<Vec<PathSegment>, DocumentError> {
    let data = element
        .attribute("pathData")
        .filter(|data| !data.trim().is_empty())
        .ok_or_else(|| DocumentError::MissingPathData {
            element: element.describe(),
        })?;
    parse::path_data(data).map_err(|source| DocumentError::PathData {
        element: element.describe(),
        source,
    })
}

// ============================================================================
// Attribute values
// ============================================================================

fn invalid(element: &Element, attribute: &'static str, value: &str, reason: String) -> DocumentError {
    DocumentError::InvalidAttribute {
        element: element.describe(),
        attribute,
        value: value.to_string(),
        reason,
    }
}

fn number_or(element: &Element, attribute: &'static str, default: f64) -> Result<f64, DocumentError> {
    match element.attribute(attribute) {
        Some(value) => {
            parse::scalar(value).map_err(|failure| invalid(element, attribute, value, failure.to_string()))
        }
        None => Ok(default),
    }
}

fn required_number(element: &Element, attribute: &'static str) -> Result<f64, DocumentError> {
    let value = element
        .attribute(attribute)
        .ok_or_else(|| DocumentError::MissingAttribute {
            element: element.describe(),
            attribute,
        })?;
    parse::scalar(value).map_err(|failure| invalid(element, attribute, value, failure.to_string()))
}

fn optional_dimension(element: &Element, attribute: &'static str) -> Result<Option<Dimension>, DocumentError> {
    element
        .attribute(attribute)
        .map(|value| {
            parse::dimension(value).map_err(|failure| invalid(element, attribute, value, failure.to_string()))
        })
        .transpose()
}

fn keyword_or<T: Default>(
    element: &Element,
    attribute: &'static str,
    from_keyword: fn(&str) -> Option<T>,
    expected: &str,
) -> Result<T, DocumentError> {
    match element.attribute(attribute) {
        Some(value) => from_keyword(value.trim())
            .ok_or_else(|| invalid(element, attribute, value, format!("expected one of {expected}"))),
        None => Ok(T::default()),
    }
}
