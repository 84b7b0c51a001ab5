use crate::sketch::constraints::ConstraintSet;
use crate::sketch::registry::PrimitiveRegistry;
use crate::sketch::types::{Constraint, ConstraintKind, Primitive, PrimitiveId};
use crate::sketch::SketchError;

fn ids(names: &[&str]) -> Vec<PrimitiveId> {
    names.iter().map(|n| PrimitiveId::named(n)).collect()
}

fn registry_with_points(names: &[&str]) -> PrimitiveRegistry {
    let mut registry = PrimitiveRegistry::new();
    for (i, name) in names.iter().enumerate() {
        registry
            .push_checked(Primitive::Point {
                id: PrimitiveId::named(name),
                x: i as f64,
                y: 0.0,
                fixed: false,
            })
            .unwrap();
    }
    registry
}

#[test]
fn test_arity_table() {
    assert_eq!(ConstraintKind::Horizontal.arity(), 2);
    assert_eq!(ConstraintKind::Vertical.arity(), 2);
    assert_eq!(ConstraintKind::Parallel.arity(), 4);
    assert_eq!(ConstraintKind::PointOnLine.arity(), 3);
    assert_eq!(ConstraintKind::EqualRadius.arity(), 2);
}

#[test]
fn test_from_args_positional_roles() {
    let constraint =
        Constraint::from_args(ConstraintKind::PointOnLine, &ids(&["p", "s", "e"])).unwrap();
    match &constraint {
        Constraint::PointOnLine {
            point,
            line_start,
            line_end,
        } => {
            // First selected id becomes the point, not a line endpoint
            assert_eq!(point.as_str(), "p");
            assert_eq!(line_start.as_str(), "s");
            assert_eq!(line_end.as_str(), "e");
        }
        other => panic!("wrong variant: {:?}", other),
    }
    let arg_ids: Vec<&str> = constraint.arg_ids().iter().map(|id| id.as_str()).collect();
    assert_eq!(arg_ids, vec!["p", "s", "e"]);
}

#[test]
fn test_from_args_rejects_wrong_arity() {
    let err = Constraint::from_args(ConstraintKind::Parallel, &ids(&["a", "b"])).unwrap_err();
    assert_eq!(
        err,
        SketchError::ArityMismatch {
            kind: ConstraintKind::Parallel,
            expected: 4,
            got: 2,
        }
    );
}

#[test]
fn test_append_is_persistent_and_ordered() {
    let set = ConstraintSet::new();
    let first = Constraint::from_args(ConstraintKind::Horizontal, &ids(&["a", "b"])).unwrap();
    let second = Constraint::from_args(ConstraintKind::Vertical, &ids(&["a", "b"])).unwrap();

    let one = set.append(first.clone());
    let two = one.append(second.clone());

    assert!(set.is_empty());
    assert_eq!(one.len(), 1);
    assert_eq!(two.all(), &[first, second]);
}

#[test]
fn test_push_checked_validates_references() {
    let registry = registry_with_points(&["a", "b"]);
    let mut set = ConstraintSet::new();

    let ok = Constraint::from_args(ConstraintKind::Horizontal, &ids(&["a", "b"])).unwrap();
    set.push_checked(ok, &registry).unwrap();
    assert_eq!(set.len(), 1);

    let dangling = Constraint::from_args(ConstraintKind::Horizontal, &ids(&["a", "ghost"])).unwrap();
    let err = set.push_checked(dangling, &registry).unwrap_err();
    assert_eq!(err, SketchError::PrimitiveNotFound(PrimitiveId::named("ghost")));
    assert_eq!(set.len(), 1, "failed push must not append");
}

#[test]
fn test_contains_equivalent_matches_roles_exactly() {
    let set = ConstraintSet::new()
        .append(Constraint::from_args(ConstraintKind::Horizontal, &ids(&["a", "b"])).unwrap());

    let same = Constraint::from_args(ConstraintKind::Horizontal, &ids(&["a", "b"])).unwrap();
    let swapped = Constraint::from_args(ConstraintKind::Horizontal, &ids(&["b", "a"])).unwrap();
    let other_kind = Constraint::from_args(ConstraintKind::Vertical, &ids(&["a", "b"])).unwrap();

    assert!(set.contains_equivalent(&same));
    assert!(!set.contains_equivalent(&swapped));
    assert!(!set.contains_equivalent(&other_kind));
}

#[test]
fn test_labels_read_like_ui_text() {
    let constraint =
        Constraint::from_args(ConstraintKind::EqualRadius, &ids(&["c1", "c2"])).unwrap();
    assert_eq!(constraint.label(), "equal_radius(c1, c2)");
    assert_eq!(constraint.kind().to_string(), "equal_radius");
}

#[test]
fn test_kind_round_trips_through_str() {
    use std::str::FromStr;
    for kind in [
        ConstraintKind::Horizontal,
        ConstraintKind::Vertical,
        ConstraintKind::Parallel,
        ConstraintKind::PointOnLine,
        ConstraintKind::EqualRadius,
    ] {
        assert_eq!(ConstraintKind::from_str(&kind.to_string()).unwrap(), kind);
    }
    assert!(ConstraintKind::from_str("tangent").is_err());
}
