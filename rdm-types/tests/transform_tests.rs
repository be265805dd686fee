use rdm_types::{CompoundOp, Error, Transform};

// ── Evaluation ──────────────────────────────────────────────────

#[test]
fn join_splits_inputs() {
    let t = Transform::shift(1.0) & Transform::shift(2.0);
    assert_eq!(t.n_inputs(), 2);
    assert_eq!(t.n_outputs(), 2);
    assert_eq!(t.evaluate(&[10.0, 20.0]).unwrap(), vec![11.0, 22.0]);
}

#[test]
fn compose_chains_outputs() {
    let t = Transform::shift(1.0) | Transform::scale(3.0);
    assert_eq!(t.n_inputs(), 1);
    assert_eq!(t.evaluate(&[2.0]).unwrap(), vec![9.0]);
}

#[test]
fn wrong_arity_is_rejected() {
    let t = Transform::shift(1.0) & Transform::shift(2.0);
    assert_eq!(
        t.evaluate(&[1.0]).unwrap_err(),
        Error::InputMismatch {
            expected: 2,
            actual: 1
        }
    );
}

// ── Operators & display ─────────────────────────────────────────

#[test]
fn join_builds_compound_variant() {
    let t = Transform::shift(1.0) & Transform::shift(2.0);
    match t {
        Transform::Compound { op, left, right } => {
            assert_eq!(op, CompoundOp::Join);
            assert_eq!(*left, Transform::Shift(1.0));
            assert_eq!(*right, Transform::Shift(2.0));
        }
        other => panic!("expected compound, got {other:?}"),
    }
}

#[test]
fn display_reads_like_expression() {
    let t = Transform::shift(1.0) & Transform::shift(2.0);
    assert_eq!(t.to_string(), "[Shift(1) & Shift(2)]");
}
