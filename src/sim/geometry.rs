//! Line-segment geometry
//!
//! The two primitives everything else is built on: where two segments cross,
//! and how far a point is from a segment.

use glam::Vec2;

/// Intersection point of segments `p1→p2` and `p3→p4`.
///
/// Both segment parameters must lie in [0, 1], so crossings of the infinite
/// line extensions are rejected. Parallel, collinear and zero-length
/// segments have a zero determinant and never intersect.
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let den = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if den == 0.0 {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / den;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / den;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1 + (p2 - p1) * t)
    } else {
        None
    }
}

/// Distance from `point` to segment `start→end`, with the closest point on it.
///
/// The projection parameter is clamped to [0, 1]. A zero-length segment
/// degrades to the distance to `start`.
pub fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> (f32, Vec2) {
    let seg = end - start;
    let len_sq = seg.length_squared();

    if len_sq == 0.0 {
        return (point.distance(start), start);
    }

    let t = ((point - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    let closest = start + seg * t;
    (point.distance(closest), closest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crossing_segments() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        )
        .unwrap();
        assert!((hit - Vec2::new(5.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_line_extension_is_not_a_hit() {
        // Infinite lines cross at (5, 5) but the second segment stops short
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(4.0, 6.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_touching_endpoint_counts() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, -5.0),
            Vec2::new(10.0, 5.0),
        );
        assert_eq!(hit, Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_parallel_and_degenerate_segments() {
        // Parallel
        assert!(
            segment_intersection(
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(10.0, 1.0),
            )
            .is_none()
        );
        // Collinear overlap
        assert!(
            segment_intersection(
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(5.0, 0.0),
                Vec2::new(15.0, 0.0),
            )
            .is_none()
        );
        // Zero-length wall sitting on the ray
        assert!(
            segment_intersection(
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(5.0, 0.0),
                Vec2::new(5.0, 0.0),
            )
            .is_none()
        );
    }

    #[test]
    fn test_distance_projects_onto_interior() {
        let (dist, closest) =
            distance_to_segment(Vec2::new(5.0, 3.0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert!((dist - 3.0).abs() < 1e-6);
        assert_eq!(closest, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_distance_clamps_to_endpoints() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(10.0, 0.0);

        let (dist, closest) = distance_to_segment(Vec2::new(-3.0, 4.0), start, end);
        assert!((dist - 5.0).abs() < 1e-6);
        assert_eq!(closest, start);

        let (dist, closest) = distance_to_segment(Vec2::new(13.0, -4.0), start, end);
        assert!((dist - 5.0).abs() < 1e-6);
        assert_eq!(closest, end);
    }

    #[test]
    fn test_distance_to_zero_length_segment() {
        let p = Vec2::new(4.0, 7.0);
        let (dist, closest) = distance_to_segment(Vec2::new(1.0, 3.0), p, p);
        assert!((dist - 5.0).abs() < 1e-6);
        assert_eq!(closest, p);
        assert!(dist.is_finite());
    }

    #[test]
    fn test_distance_is_deterministic() {
        let a = distance_to_segment(Vec2::new(3.3, 7.1), Vec2::new(-2.0, 1.5), Vec2::new(9.25, 4.0));
        let b = distance_to_segment(Vec2::new(3.3, 7.1), Vec2::new(-2.0, 1.5), Vec2::new(9.25, 4.0));
        assert_eq!(a.0.to_bits(), b.0.to_bits());
        assert_eq!(a.1, b.1);
    }

    fn coord() -> impl Strategy<Value = f32> {
        -100.0f32..100.0
    }

    fn point() -> impl Strategy<Value = Vec2> {
        (coord(), coord()).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_points_on_segment_have_zero_distance(
            a in point(),
            b in point(),
            s in 0.0f32..=1.0,
        ) {
            prop_assume!(a.distance(b) > 1.0);
            let on = a + (b - a) * s;
            let (dist, _) = distance_to_segment(on, a, b);
            prop_assert!(dist < 1e-3, "distance {dist} for point on segment");
        }

        #[test]
        fn prop_points_off_segment_have_positive_distance(
            a in point(),
            b in point(),
            s in 0.0f32..=1.0,
            offset in 1.0f32..50.0,
        ) {
            prop_assume!(a.distance(b) > 1.0);
            let normal = (b - a).perp().normalize();
            let off = a + (b - a) * s + normal * offset;
            let (dist, _) = distance_to_segment(off, a, b);
            prop_assert!((dist - offset).abs() < 1e-2, "expected {offset}, got {dist}");
        }

        #[test]
        fn prop_intersection_is_symmetric(
            a in point(),
            b in point(),
            c in point(),
            d in point(),
        ) {
            let den = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
            prop_assume!(den.abs() > 100.0);
            let ab_cd = segment_intersection(a, b, c, d);
            let cd_ab = segment_intersection(c, d, a, b);
            match (ab_cd, cd_ab) {
                (Some(p), Some(q)) => prop_assert!(p.distance(q) < 0.05, "{p} vs {q}"),
                (None, None) => {}
                other => prop_assert!(false, "asymmetric result {other:?}"),
            }
        }
    }
}
