//! Group transforms
//!
//! A group's parameters are authored in viewport units. The local transform
//! is built there, undistorted, and only then conjugated by the per-axis
//! target scale. Rotating after a non-uniform stretch would shear the
//! artwork; conjugating keeps a rotated square a rotated, foreshortened
//! square.

use glam::{DAffine2, DVec2, dvec2};

use crate::types::Scale;

use super::defaults;

/// Pivot, rotation, scale and translation of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTransform {
    pub pivot: DVec2,
    /// Degrees, clockwise on screen (y grows downward)
    pub rotation: f64,
    pub scale: DVec2,
    pub translation: DVec2,
}

impl GroupTransform {
    pub const IDENTITY: GroupTransform = GroupTransform {
        pivot: DVec2::splat(defaults::PIVOT),
        rotation: defaults::ROTATION,
        scale: DVec2::splat(defaults::SCALE),
        translation: DVec2::splat(defaults::TRANSLATION),
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The transform in document space.
    ///
    /// Applied to a point: move the pivot to the origin, rotate, scale, move
    /// the pivot back, then translate.
    pub fn local(&self) -> DAffine2 {
        DAffine2::from_translation(self.translation + self.pivot)
            * DAffine2::from_scale(self.scale)
            * DAffine2::from_angle(self.rotation.to_radians())
            * DAffine2::from_translation(-self.pivot)
    }

    /// The transform in target space, for points already scaled by `scale`.
    pub fn affine_transform(&self, scale: Scale) -> DAffine2 {
        if self.is_identity() {
            return DAffine2::IDENTITY;
        }
        let factor = scale.factor();
        DAffine2::from_scale(factor)
            * self.local()
            * DAffine2::from_scale(dvec2(1.0 / factor.x, 1.0 / factor.y))
    }
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// World transform of a group whose parent's world transform is `parent`.
///
/// The child's own transform applies first, then the parent's.
pub fn compose(parent: DAffine2, group: &GroupTransform, scale: Scale) -> DAffine2 {
    parent * group.affine_transform(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    fn assert_close(actual: DVec2, expected: DVec2) {
        assert!(
            actual.abs_diff_eq(expected, 1e-9),
            "expected {expected}, got {actual}"
        );
    }

    fn rotate_about(p: DVec2, center: DVec2, degrees: f64) -> DVec2 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let d = p - center;
        center + dvec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
    }

    #[test]
    fn identity_by_default() {
        let group = GroupTransform::default();
        assert!(group.is_identity());
        assert_eq!(group.local(), DAffine2::IDENTITY);
        assert_eq!(group.affine_transform(Scale::try_new(3.0, 0.5).unwrap()), DAffine2::IDENTITY);
    }

    #[test]
    fn rotation_about_pivot_matches_direct_rotation() {
        let pivot = dvec2(300.0, 300.0);
        let group = GroupTransform {
            pivot,
            rotation: 45.0,
            ..GroupTransform::IDENTITY
        };
        let world = compose(DAffine2::IDENTITY, &group, Scale::IDENTITY);
        // a right angle: (300,70) -> (300,0) -> (370,70)
        for p in [dvec2(300.0, 70.0), dvec2(300.0, 0.0), dvec2(370.0, 70.0)] {
            assert_close(world.transform_point2(p), rotate_about(p, pivot, 45.0));
        }
        // the pivot is fixed
        assert_close(world.transform_point2(pivot), pivot);
    }

    #[test]
    fn stages_apply_in_order() {
        let group = GroupTransform {
            pivot: dvec2(10.0, 0.0),
            rotation: 90.0,
            scale: dvec2(2.0, 3.0),
            translation: dvec2(100.0, 0.0),
        };
        // (11,0): -pivot (1,0), rotate (0,1), scale (0,3), +pivot (10,3), +translation
        assert_close(group.local().transform_point2(dvec2(11.0, 0.0)), dvec2(110.0, 3.0));
    }

    #[test]
    fn rotation_happens_before_non_uniform_target_scale() {
        let scale = Scale::between(Size::new(100.0, 100.0), Size::new(200.0, 100.0)).unwrap();
        let group = GroupTransform {
            pivot: dvec2(50.0, 50.0),
            rotation: 90.0,
            ..GroupTransform::IDENTITY
        };
        let world = group.affine_transform(scale);
        // document (60,50) rotates to (50,60), which lands at (100,60)
        let target = world.transform_point2(scale.apply(dvec2(60.0, 50.0)));
        assert_close(target, dvec2(100.0, 60.0));
    }

    #[test]
    fn child_applies_before_parent() {
        let parent = GroupTransform {
            translation: dvec2(5.0, 0.0),
            ..GroupTransform::IDENTITY
        };
        let child = GroupTransform {
            scale: dvec2(2.0, 2.0),
            ..GroupTransform::IDENTITY
        };
        let scale = Scale::IDENTITY;
        let world = compose(compose(DAffine2::IDENTITY, &parent, scale), &child, scale);
        // scaled first, then translated
        assert_close(world.transform_point2(dvec2(1.0, 1.0)), dvec2(7.0, 2.0));
    }

    #[test]
    fn translation_is_rescaled_per_axis() {
        let group = GroupTransform {
            translation: dvec2(10.0, 10.0),
            ..GroupTransform::IDENTITY
        };
        let world = group.affine_transform(Scale::try_new(2.0, 0.5).unwrap());
        assert_close(world.transform_point2(DVec2::ZERO), dvec2(20.0, 5.0));
    }
}
