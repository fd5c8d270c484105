//! Spatial primitives for the dish
//!
//! Everything is a circle of `SPRITE_RADIUS` in the plane, so contact is a
//! single distance comparison. The dish boundary is measured from
//! `DISH_CENTER`.

use glam::DVec2;

use crate::consts::*;
use crate::{cartesian_to_polar, heading};

/// Anything that occupies a spot in the dish
pub trait Body {
    fn id(&self) -> u32;
    fn pos(&self) -> DVec2;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Two distinct bodies overlap when their centers are within two sprite radii
pub fn overlap<A: Body + ?Sized, B: Body + ?Sized>(a: &A, b: &B) -> bool {
    a.id() != b.id() && distance(a.pos(), b.pos()) <= OVERLAP_DISTANCE
}

/// Whether a point lies strictly inside the dish wall
#[inline]
pub fn inside_dish(pos: DVec2) -> bool {
    distance(pos, DISH_CENTER) < DISH_RADIUS
}

/// Destination of a single step along a heading
#[inline]
pub fn step_from(pos: DVec2, direction: f64, step: f64) -> DVec2 {
    pos + heading(direction) * step
}

/// Heading in degrees from one point toward another
#[inline]
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

/// Angle of a point around the dish center, in degrees
#[inline]
pub fn rim_angle(pos: DVec2) -> f64 {
    cartesian_to_polar(pos).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Dot(u32, DVec2);

    impl Body for Dot {
        fn id(&self) -> u32 {
            self.0
        }
        fn pos(&self) -> DVec2 {
            self.1
        }
    }

    #[test]
    fn test_overlap_threshold() {
        let a = Dot(1, DVec2::ZERO);
        assert!(overlap(&a, &Dot(2, DVec2::new(OVERLAP_DISTANCE, 0.0))));
        assert!(!overlap(&a, &Dot(2, DVec2::new(OVERLAP_DISTANCE + 0.01, 0.0))));
    }

    #[test]
    fn test_same_body_never_overlaps() {
        let a = Dot(7, DVec2::new(3.0, 4.0));
        assert!(!overlap(&a, &a));
    }

    #[test]
    fn test_inside_dish() {
        assert!(inside_dish(DISH_CENTER));
        assert!(inside_dish(DVec2::new(DISH_RADIUS - 0.5, 0.0)));
        assert!(!inside_dish(DVec2::new(0.0, DISH_RADIUS)));
        assert!(!inside_dish(DVec2::new(DISH_RADIUS, DISH_RADIUS)));
    }

    #[test]
    fn test_bearing_and_step() {
        assert!((bearing(DVec2::ZERO, DVec2::new(0.0, 10.0)) - 90.0).abs() < 1e-9);
        assert!((bearing(DVec2::ZERO, DVec2::new(-10.0, 0.0)) - 180.0).abs() < 1e-9);
        let p = step_from(DVec2::ZERO, 90.0, 3.0);
        assert!(p.x.abs() < 1e-9 && (p.y - 3.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn proptest_overlap_symmetric(
            ax in -128.0f64..128.0, ay in -128.0f64..128.0,
            bx in -128.0f64..128.0, by in -128.0f64..128.0,
        ) {
            let a = Dot(1, DVec2::new(ax, ay));
            let b = Dot(2, DVec2::new(bx, by));
            prop_assert_eq!(overlap(&a, &b), overlap(&b, &a));
            prop_assert!(!overlap(&a, &a));
        }
    }
}
