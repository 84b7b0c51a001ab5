use crate::sketch::registry::PrimitiveRegistry;
use crate::sketch::types::{Primitive, PrimitiveId};
use crate::sketch::SketchError;

fn point(name: &str, x: f64, y: f64, fixed: bool) -> Primitive {
    Primitive::Point {
        id: PrimitiveId::named(name),
        x,
        y,
        fixed,
    }
}

fn seed() -> PrimitiveRegistry {
    let mut registry = PrimitiveRegistry::new();
    registry.push_checked(point("0", 0.0, 0.0, true)).unwrap();
    registry.push_checked(point("1", 1.0, 1.0, false)).unwrap();
    registry
        .push_checked(Primitive::Line {
            id: PrimitiveId::named("l0"),
            start: PrimitiveId::named("0"),
            end: PrimitiveId::named("1"),
        })
        .unwrap();
    registry
        .push_checked(Primitive::Circle {
            id: PrimitiveId::named("c0"),
            center: PrimitiveId::named("0"),
            radius: 2.0,
            fixed: false,
        })
        .unwrap();
    registry
}

#[test]
fn test_get_and_require() {
    let registry = seed();
    assert!(registry.get(&PrimitiveId::named("1")).is_some());
    assert!(registry.get(&PrimitiveId::named("nope")).is_none());

    // Unknown ids are broken references, not silent defaults
    let err = registry.require(&PrimitiveId::named("nope")).unwrap_err();
    assert_eq!(err, SketchError::PrimitiveNotFound(PrimitiveId::named("nope")));
}

#[test]
fn test_order_is_insertion_order() {
    let registry = seed();
    let ids: Vec<&str> = registry.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "l0", "c0"]);
}

#[test]
fn test_push_rejects_duplicate_id() {
    let mut registry = seed();
    let err = registry.push_checked(point("0", 5.0, 5.0, false)).unwrap_err();
    assert_eq!(err, SketchError::DuplicateId(PrimitiveId::named("0")));
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_push_rejects_dangling_line_endpoint() {
    let mut registry = seed();
    let err = registry
        .push_checked(Primitive::Line {
            id: PrimitiveId::named("l1"),
            start: PrimitiveId::named("0"),
            end: PrimitiveId::named("ghost"),
        })
        .unwrap_err();
    assert_eq!(err, SketchError::PrimitiveNotFound(PrimitiveId::named("ghost")));
}

#[test]
fn test_line_endpoint_must_be_a_point() {
    let mut registry = seed();
    // A line referencing a circle as an endpoint is an integrity error
    let err = registry
        .push_checked(Primitive::Line {
            id: PrimitiveId::named("l1"),
            start: PrimitiveId::named("0"),
            end: PrimitiveId::named("c0"),
        })
        .unwrap_err();
    assert_eq!(err, SketchError::NotAPoint(PrimitiveId::named("c0")));
}

#[test]
fn test_with_point_moved_changes_only_that_point() {
    let before = seed();
    let after = before
        .with_point_moved(&PrimitiveId::named("1"), 3.0, 4.0)
        .unwrap();

    assert_eq!(after.point_pos(&PrimitiveId::named("1")).unwrap(), [3.0, 4.0]);
    // The fixed flag survives the move
    match after.get(&PrimitiveId::named("1")).unwrap() {
        Primitive::Point { fixed, .. } => assert!(!*fixed),
        _ => panic!("expected a point"),
    }
    // Everything else is untouched, and the old registry still holds the
    // pre-move value
    assert_eq!(after.point_pos(&PrimitiveId::named("0")).unwrap(), [0.0, 0.0]);
    assert_eq!(before.point_pos(&PrimitiveId::named("1")).unwrap(), [1.0, 1.0]);
}

#[test]
fn test_with_point_moved_rejects_non_points() {
    let registry = seed();
    let err = registry
        .with_point_moved(&PrimitiveId::named("l0"), 1.0, 1.0)
        .unwrap_err();
    assert_eq!(err, SketchError::NotAPoint(PrimitiveId::named("l0")));

    let err = registry
        .with_point_moved(&PrimitiveId::named("missing"), 1.0, 1.0)
        .unwrap_err();
    assert_eq!(
        err,
        SketchError::PrimitiveNotFound(PrimitiveId::named("missing"))
    );
}

#[test]
fn test_replace_all_is_total() {
    let registry = seed();
    let replaced = registry.replace_all(vec![point("9", 9.0, 9.0, false)]);
    assert_eq!(replaced.len(), 1);
    assert!(replaced.get(&PrimitiveId::named("0")).is_none());
    // The original registry value is preserved
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_point_pos_resolves_through_registry() {
    let registry = seed();
    assert_eq!(registry.point_pos(&PrimitiveId::named("0")).unwrap(), [0.0, 0.0]);
    let err = registry.point_pos(&PrimitiveId::named("c0")).unwrap_err();
    assert_eq!(err, SketchError::NotAPoint(PrimitiveId::named("c0")));
}
