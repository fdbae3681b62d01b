use approx::assert_relative_eq;
use tracing_subscriber::EnvFilter;
use wallplan::error::{GeometryError, PlanError};
use wallplan::math::{segment_intersection, segment_length, PlanPoint, Tolerances};
use wallplan::operations::AddWallWithSplitting;
use wallplan::registry::{RemoveOutcome, WallId, WallRegistry, WallSpec};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn p(x: f64, z: f64) -> PlanPoint {
    PlanPoint::new(x, z)
}

fn spec(x0: f64, z0: f64, x1: f64, z1: f64) -> WallSpec {
    WallSpec::new(p(x0, z0), p(x1, z1), 0.2, 3.0)
}

fn add(reg: &mut WallRegistry, s: WallSpec) -> wallplan::operations::SplitOutcome {
    AddWallWithSplitting::new(s).execute(reg).unwrap()
}

fn has_wall(reg: &WallRegistry, a: PlanPoint, b: PlanPoint) -> bool {
    reg.iter().any(|w| {
        w.start().coincides_with(&a, 1e-9) && w.end().coincides_with(&b, 1e-9)
    })
}

#[test]
fn scenario_a_single_wall() {
    init_tracing();
    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));

    let walls = reg.all();
    assert_eq!(walls.len(), 1);
    assert_relative_eq!(walls[0].length(), 10.0);
}

#[test]
fn scenario_b_cross_splits_into_four() {
    init_tracing();
    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));
    let out = add(&mut reg, spec(5.0, -5.0, 5.0, 5.0));

    assert_eq!(reg.len(), 4);
    assert_eq!(out.removed, vec![WallId::auto(1)]);
    assert_eq!(out.created.len(), 4);
    assert!(has_wall(&reg, p(0.0, 0.0), p(5.0, 0.0)));
    assert!(has_wall(&reg, p(5.0, 0.0), p(10.0, 0.0)));
    assert!(has_wall(&reg, p(5.0, -5.0), p(5.0, 0.0)));
    assert!(has_wall(&reg, p(5.0, 0.0), p(5.0, 5.0)));
    assert!(reg.get(&WallId::auto(1)).is_none());
}

#[test]
fn scenario_c_parallel_walls_do_not_split() {
    init_tracing();
    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));
    let out = add(&mut reg, spec(0.0, 5.0, 10.0, 5.0));

    assert!(!out.was_split());
    assert_eq!(reg.len(), 2);
}

#[test]
fn scenario_d_remove_missing_id() {
    init_tracing();
    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));
    let before = reg.all();

    assert_eq!(reg.remove(&WallId::new("nope")), RemoveOutcome::NotFound);
    assert_eq!(reg.all(), before);
}

#[test]
fn scenario_e_exact_duplicate_rejected() {
    init_tracing();
    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));
    let before = reg.all();

    for dup in [spec(0.0, 0.0, 10.0, 0.0), spec(10.0, 0.0, 0.0, 0.0)] {
        let err = AddWallWithSplitting::new(dup).execute(&mut reg).unwrap_err();
        assert!(matches!(err, PlanError::Geometry(GeometryError::DuplicateWall(_))));
        assert_eq!(reg.all(), before);
    }
}

#[test]
fn collinear_partial_overlap_is_added_unsplit() {
    init_tracing();
    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));
    let out = add(&mut reg, spec(5.0, 0.0, 15.0, 0.0));
    assert!(!out.was_split());
    assert_eq!(reg.len(), 2);
}

#[test]
fn non_crossing_wall_leaves_others_untouched() {
    init_tracing();
    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));
    add(&mut reg, spec(10.0, 0.0, 10.0, 10.0));
    add(&mut reg, spec(2.0, 3.0, 7.0, 8.0));
    let before = reg.all();

    let out = add(&mut reg, spec(-5.0, -5.0, -1.0, -9.0));
    assert_eq!(out.created.len(), 1);
    assert!(out.removed.is_empty());
    assert_eq!(reg.len(), before.len() + 1);
    assert_eq!(&reg.all()[..before.len()], &before[..]);
}

#[test]
fn grid_keeps_lengths_and_lineage() {
    init_tracing();
    let mut reg = WallRegistry::new();
    for x in [2.0, 4.0, 6.0, 8.0] {
        add(&mut reg, spec(x, 0.0, x, 10.0));
    }
    let originals: Vec<_> = reg.iter().map(|w| w.id().clone()).collect();
    for z in [1.5, 5.0, 8.5] {
        add(&mut reg, spec(0.0, z, 10.0, z));
    }

    for original in &originals {
        let total: f64 = reg
            .iter()
            .filter(|w| w.id().is_descendant_of(original))
            .map(|w| segment_length(w.start(), w.end()))
            .sum();
        assert_relative_eq!(total, 10.0, epsilon = 1e-9);
        assert!(reg.get(original).is_none());
    }
    // Each vertical wall ends in 4 pieces, each horizontal wall in 5.
    assert_eq!(reg.len(), 4 * 4 + 3 * 5);
    assert!(reg.iter().all(|w| w.length() > 0.0));
}

#[test]
fn intersection_is_symmetric() {
    let tol = Tolerances::default();
    let segments = [
        (p(0.0, 0.0), p(10.0, 0.0)),
        (p(5.0, -5.0), p(5.0, 5.0)),
        (p(-1.25, 3.5), p(7.75, -2.0)),
        (p(0.1, 0.2), p(9.3, 8.7)),
        (p(3.0, 9.0), p(3.5, -4.0)),
    ];
    for (a0, a1) in &segments {
        for (b0, b1) in &segments {
            assert_eq!(
                segment_intersection(a0, a1, b0, b1, &tol),
                segment_intersection(b0, b1, a0, a1, &tol)
            );
        }
    }
}

#[test]
fn default_endpoint_tolerance_boundary() {
    init_tracing();
    // Default endpoint tolerance is 0.1 m.
    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));
    let near = add(&mut reg, spec(0.05, -1.0, 0.05, 1.0));
    assert!(near.removed.is_empty());

    let mut reg = WallRegistry::new();
    add(&mut reg, spec(0.0, 0.0, 10.0, 0.0));
    let far = add(&mut reg, spec(0.2, -1.0, 0.2, 1.0));
    assert_eq!(far.removed, vec![WallId::auto(1)]);
}
