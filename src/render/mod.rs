//! Rendering of vector documents into drawing operations
//!
//! This module is organized into submodules:
//! - `defaults`: Default attribute values and tunables
//! - `context`: PriorContext threaded between path segments
//! - `eval`: Segment evaluation
//! - `geometry`: Reflection, quadratic elevation and arc conversion
//! - `transform`: Group transforms under target rescaling
//! - `sink`: The path-sink capability and the recording sink
//! - `svg`: SVG path-data output

pub mod context;
pub mod defaults;
pub mod eval;
pub mod geometry;
pub mod sink;
pub mod svg;
pub mod transform;

// Re-export commonly used items
pub use context::PriorContext;
pub use eval::evaluate;
pub use sink::{DrawOp, PathSink, TransformSink};
pub use svg::SvgPathWriter;
pub use transform::{GroupTransform, compose};

use glam::DAffine2;

use crate::ast::PathSegment;
use crate::document::{Group, PathStyle};
use crate::log::debug;
use crate::types::Scale;

/// Whether a rendered path is drawn or used as a clip.
#[derive(Debug, Clone, PartialEq)]
pub enum PathKind {
    Draw(PathStyle),
    Clip,
}

/// One path's operations in target units, already mapped through its
/// group's world transform.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPath {
    pub name: Option<String>,
    pub kind: PathKind,
    /// World transform of the enclosing group, in target units
    pub transform: DAffine2,
    pub ops: Vec<DrawOp>,
}

impl RenderedPath {
    pub fn is_clip(&self) -> bool {
        matches!(self.kind, PathKind::Clip)
    }

    /// The operations as SVG path data.
    pub fn to_svg_data(&self) -> String {
        svg::path_data(&self.ops)
    }

    /// Send the operations to a backend sink.
    pub fn replay(&self, sink: &mut dyn PathSink) {
        for op in &self.ops {
            op.replay(sink);
        }
    }
}

/// Evaluate one path's segments from a fresh context and map the result
/// through `transform`.
pub fn render_segments(segments: &[PathSegment], transform: DAffine2, scale: Scale) -> Vec<DrawOp> {
    let mut ops: Vec<DrawOp> = Vec::new();
    if transform == DAffine2::IDENTITY {
        evaluate(segments, PriorContext::ZERO, &mut ops, scale);
    } else {
        let mut sink = TransformSink::new(&mut ops, transform);
        evaluate(segments, PriorContext::ZERO, &mut sink, scale);
    }
    ops
}

/// Walk `groups` root to leaf, producing one rendered path per clip path
/// and path entity.
///
/// Within a group, clip paths come first, then the group's own paths, then
/// its child groups.
pub fn render_groups(groups: &[Group], scale: Scale) -> Vec<RenderedPath> {
    debug!(%scale, groups = groups.len(), "rendering document");
    let mut out = Vec::new();
    for group in groups {
        render_group(group, DAffine2::IDENTITY, scale, &mut out);
    }
    out
}

fn render_group(group: &Group, parent: DAffine2, scale: Scale, out: &mut Vec<RenderedPath>) {
    let world = compose(parent, &group.transform, scale);

    for clip in &group.clip_paths {
        out.push(RenderedPath {
            name: clip.name.clone(),
            kind: PathKind::Clip,
            transform: world,
            ops: render_segments(&clip.segments, world, scale),
        });
    }

    for path in &group.paths {
        out.push(RenderedPath {
            name: path.name.clone(),
            kind: PathKind::Draw(path.style.clone()),
            transform: world,
            ops: render_segments(&path.segments, world, scale),
        });
    }

    for child in &group.groups {
        render_group(child, world, scale, out);
    }
}
