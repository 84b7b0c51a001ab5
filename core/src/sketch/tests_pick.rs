use crate::sketch::pick::{pick, PickConfig, PickTarget};
use crate::sketch::registry::PrimitiveRegistry;
use crate::sketch::types::{Primitive, PrimitiveId};
use crate::sketch::SketchError;

fn id(name: &str) -> PrimitiveId {
    PrimitiveId::named(name)
}

/// Horizontal line from (0,0) to (10,0) plus a circle of radius 2 at (5,5).
fn scene() -> PrimitiveRegistry {
    let mut registry = PrimitiveRegistry::new();
    registry
        .push_checked(Primitive::Point {
            id: id("a"),
            x: 0.0,
            y: 0.0,
            fixed: false,
        })
        .unwrap();
    registry
        .push_checked(Primitive::Point {
            id: id("b"),
            x: 10.0,
            y: 0.0,
            fixed: false,
        })
        .unwrap();
    registry
        .push_checked(Primitive::Line {
            id: id("l"),
            start: id("a"),
            end: id("b"),
        })
        .unwrap();
    registry
        .push_checked(Primitive::Point {
            id: id("c"),
            x: 5.0,
            y: 5.0,
            fixed: false,
        })
        .unwrap();
    registry
        .push_checked(Primitive::Circle {
            id: id("k"),
            center: id("c"),
            radius: 2.0,
            fixed: false,
        })
        .unwrap();
    registry
}

#[test]
fn test_empty_space_hits_nothing() {
    let registry = scene();
    let hit = pick(&registry, [50.0, 50.0], &PickConfig::default()).unwrap();
    assert!(hit.is_none());
}

#[test]
fn test_point_wins_over_its_line() {
    let registry = scene();
    // Near endpoint a: both the point and the line body are in range
    let hit = pick(&registry, [0.1, 0.1], &PickConfig::default())
        .unwrap()
        .expect("something under cursor");
    assert_eq!(hit.id, id("a"));
    assert_eq!(hit.target, PickTarget::Point);
}

#[test]
fn test_line_body_is_pickable() {
    let registry = scene();
    let hit = pick(&registry, [5.0, 0.3], &PickConfig::default())
        .unwrap()
        .expect("line under cursor");
    assert_eq!(hit.id, id("l"));
    assert_eq!(hit.target, PickTarget::LineSegment);
    assert_eq!(hit.position, [5.0, 0.0]);
    assert!((hit.distance - 0.3).abs() < 1e-9);
}

#[test]
fn test_circle_rim_is_pickable() {
    let registry = scene();
    // (5, 7.2) is 0.2 outside the rim
    let hit = pick(&registry, [5.0, 7.2], &PickConfig::default())
        .unwrap()
        .expect("circle under cursor");
    assert_eq!(hit.id, id("k"));
    assert_eq!(hit.target, PickTarget::CircleEdge);
    assert!((hit.distance - 0.2).abs() < 1e-9);
    assert!((hit.position[1] - 7.0).abs() < 1e-9);
}

#[test]
fn test_center_point_wins_over_rim() {
    let registry = scene();
    // Inside the circle, close to its center point: rim is 2 - 0.2 away,
    // the center point only 0.2
    let hit = pick(
        &registry,
        [5.0, 5.2],
        &PickConfig { pick_radius: 2.0 },
    )
    .unwrap()
    .expect("center point under cursor");
    assert_eq!(hit.id, id("c"));
    assert_eq!(hit.target, PickTarget::Point);
}

#[test]
fn test_pick_radius_cutoff() {
    let registry = scene();
    let tight = PickConfig { pick_radius: 0.05 };
    assert!(pick(&registry, [5.0, 0.3], &tight).unwrap().is_none());
}

#[test]
fn test_dangling_reference_fails_loudly() {
    let registry = scene();
    // Drop point "b" but keep the line that references it
    let broken = registry.replace_all(
        registry
            .all()
            .iter()
            .filter(|p| p.id() != &id("b"))
            .cloned()
            .collect(),
    );
    let err = pick(&broken, [5.0, 0.0], &PickConfig::default()).unwrap_err();
    assert_eq!(err, SketchError::PrimitiveNotFound(id("b")));
}
