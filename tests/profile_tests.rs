mod support;

use gearprofile::{
    ArgumentError, GearError, GearKind, GearSpecification, PointCounts, SegmentRole, ToothProfile,
    float_types::{PI, Real},
    generate_external_tooth_profile, generate_internal_tooth_profile, generate_tooth_profile,
    involute::{mirror_x_axis, rotate},
};
use support::{angle_of, approx_eq, assert_chained, dist, external_sweep};

// --------------------------------------------------------
//   External gears
// --------------------------------------------------------

#[test]
fn test_standard_spur_gear() {
    let tooth = generate_external_tooth_profile(&GearSpecification::external(20, 2.0, 20.0))
        .expect("20 tooth gear is valid");
    let g = &tooth.geometry;

    assert!(approx_eq(g.pitch_radius, 20.0, 1e-9));
    assert!(approx_eq(g.base_radius, 18.793_852_415_718_17, 1e-9));
    assert!(approx_eq(g.addendum_radius, 22.0, 1e-9));
    assert!(approx_eq(g.dedendum_radius, 17.5, 1e-9));
    assert!(approx_eq(g.tooth_rotation_angle, -0.186_888_400_414_162_44, 1e-9));

    assert!(tooth.has_trochoid(), "base circle is above the root circle");
    assert_eq!(tooth.involute_1.len(), 10);
    assert_eq!(tooth.involute_2.len(), 10);
    assert_eq!(tooth.trochoid_1.len(), 10);
    assert_eq!(tooth.trochoid_2.len(), 10);
    assert_eq!(tooth.upper_arc.len(), 5);
    assert_eq!(tooth.lower_arc.len(), 5);
}

#[test]
fn test_tip_and_root_arcs_lie_on_their_circles() {
    let tooth = generate_external_tooth_profile(&GearSpecification::external(20, 2.0, 20.0))
        .expect("valid gear");
    let g = &tooth.geometry;
    for p in &tooth.upper_arc {
        assert!(approx_eq(p.coords.norm(), g.addendum_radius, 1e-9));
    }
    for p in &tooth.lower_arc {
        assert!(approx_eq(p.coords.norm(), g.dedendum_radius, 1e-9));
    }
    // the trochoid starts on the root circle and ends on the base circle
    let first = tooth.trochoid_1.first().expect("fillet present");
    let last = tooth.trochoid_1.last().expect("fillet present");
    assert!(approx_eq(first.coords.norm(), g.dedendum_radius, 1e-6));
    assert!(approx_eq(last.coords.norm(), g.base_radius, 1e-6));
}

#[test]
fn test_no_trochoid_without_undercut() {
    let tooth = generate_external_tooth_profile(&GearSpecification::external(60, 1.0, 20.0))
        .expect("valid gear");
    let g = &tooth.geometry;
    assert!(g.base_radius <= g.dedendum_radius);
    assert!(!tooth.has_trochoid());
    assert!(tooth.trochoid_1.is_empty() && tooth.trochoid_2.is_empty());

    // the involute runs right down to the root circle
    let foot = tooth.involute_1.first().expect("involute points");
    assert!(approx_eq(foot.coords.norm(), g.dedendum_radius, 1e-9));
}

#[test]
fn test_undercut_suppression_shifts_small_gear() {
    let spec = GearSpecification::external(12, 2.0, 20.0).with_undercut_suppression(true);
    let tooth = generate_external_tooth_profile(&spec).expect("valid gear");
    let g = &tooth.geometry;
    assert!(approx_eq(g.profile_shift, 1.276_311_449_430_901_1, 1e-9));
    assert!(g.base_radius <= g.pitch_radius - g.module + 1e-9);
}

#[test]
fn test_base_circle_outside_pitch_circle_is_rejected() {
    let spec = GearSpecification::external(6, 5.0, 28.0).with_profile_shift(-8.0);
    let err = generate_external_tooth_profile(&spec).unwrap_err();
    match err {
        GearError::InvalidGeometry {
            base_radius,
            pitch_radius,
        } => {
            assert!(approx_eq(pitch_radius, 7.0, 1e-9));
            assert!(base_radius > pitch_radius);
        },
        other => panic!("expected InvalidGeometry, got {other:?}"),
    }
}

#[test]
fn test_external_segments_join_end_to_end() {
    for (teeth, module, pressure_angle, shift) in external_sweep() {
        let spec = GearSpecification::external(teeth, module, pressure_angle)
            .with_profile_shift(shift);
        let Ok(tooth) = generate_external_tooth_profile(&spec) else {
            continue;
        };
        let context = format!("z={teeth} pa={pressure_angle} shift={shift}");
        let contour = tooth.contour();
        let segments: Vec<_> = contour.iter().map(|(_, s)| *s).collect();
        assert_chained(&segments, 1e-6 * module, &context);

        // the root arc ends at the next tooth's first point
        let start = tooth
            .trochoid_1
            .first()
            .or_else(|| tooth.involute_1.first())
            .expect("tooth has points");
        let wrapped = rotate(start, -tooth.geometry.angular_pitch());
        let end = tooth.lower_arc.last().expect("arc has points");
        assert!(dist(end, &wrapped) < 1e-6 * module, "{context}: root arc wrap");
    }
}

#[test]
fn test_trochoid_presence_follows_base_and_root_circles() {
    for (teeth, module, pressure_angle, shift) in external_sweep() {
        let spec = GearSpecification::external(teeth, module, pressure_angle)
            .with_profile_shift(shift);
        let Ok(tooth) = generate_external_tooth_profile(&spec) else {
            continue;
        };
        let g = &tooth.geometry;
        assert_eq!(
            tooth.has_trochoid(),
            g.base_radius > g.dedendum_radius,
            "z={teeth} pa={pressure_angle} shift={shift}"
        );
        assert_eq!(tooth.trochoid_1.len(), tooth.trochoid_2.len());
    }
}

#[test]
fn test_external_flanks_are_mirror_images() {
    let tooth = generate_external_tooth_profile(&GearSpecification::external(17, 3.0, 20.0))
        .expect("valid gear");
    let rotation = tooth.geometry.tooth_rotation_angle;

    let second: Vec<_> = tooth.involute_2.clone().reversed().points;
    for (a, b) in tooth.involute_1.iter().zip(&second) {
        assert!(dist(&rotate(&mirror_x_axis(a), rotation), b) < 1e-9);
    }

    let second: Vec<_> = tooth.trochoid_2.clone().reversed().points;
    assert!(!second.is_empty());
    for (a, b) in tooth.trochoid_1.iter().zip(&second) {
        assert!(dist(&rotate(&mirror_x_axis(a), rotation), b) < 1e-9);
    }
}

#[test]
fn test_suppression_never_lowers_shift() {
    for teeth in [6, 8, 10, 14, 20, 40, 100] {
        for shift in [-3.0, -1.0, 0.0, 0.5, 2.0] {
            let spec = GearSpecification::external(teeth, 2.0, 20.0)
                .with_profile_shift(shift)
                .with_undercut_suppression(true);
            let tooth = generate_external_tooth_profile(&spec).expect("suppressed gear is valid");
            let g = &tooth.geometry;
            assert!(g.profile_shift >= shift, "z={teeth} shift={shift}");
            assert!(
                g.base_radius <= g.pitch_radius - g.module + 1e-9,
                "z={teeth} shift={shift}: base circle still undercut"
            );
        }
    }
}

#[test]
fn test_point_counts_are_honoured() {
    let spec = GearSpecification::external(20, 2.0, 20.0)
        .with_point_counts(PointCounts::external(25, 7, 3, 11));
    let tooth = generate_external_tooth_profile(&spec).expect("valid gear");
    assert_eq!(tooth.involute_1.len(), 25);
    assert_eq!(tooth.involute_2.len(), 25);
    assert_eq!(tooth.trochoid_1.len(), 7);
    assert_eq!(tooth.upper_arc.len(), 3);
    assert_eq!(tooth.lower_arc.len(), 11);
}

#[test]
fn test_external_closing_lines_pass_through_centre() {
    let tooth = generate_external_tooth_profile(&GearSpecification::external(20, 2.0, 20.0))
        .expect("valid gear");
    let [to_contour, to_centre] = tooth.closing_lines();
    assert_eq!(to_contour.start.coords.norm(), 0.0);
    assert_eq!(Some(&to_contour.end), tooth.trochoid_1.first());
    assert_eq!(Some(&to_centre.start), tooth.lower_arc.last());
    assert_eq!(to_centre.end.coords.norm(), 0.0);
}

// --------------------------------------------------------
//   Internal gears
// --------------------------------------------------------

#[test]
fn test_ring_gear() {
    let tooth = generate_internal_tooth_profile(&GearSpecification::internal(40, 2.0, 20.0, 10.0))
        .expect("ring gear is valid");
    let g = &tooth.geometry;

    assert!(approx_eq(g.addendum_radius, 38.0, 1e-9));
    assert!(approx_eq(g.dedendum_radius, 42.5, 1e-9));
    assert!(approx_eq(tooth.rim_radius(), 52.5, 1e-9));
    for p in &tooth.external_arc {
        assert!(approx_eq(p.coords.norm(), 52.5, 1e-9));
    }
    for p in &tooth.upper_arc {
        assert!(approx_eq(p.coords.norm(), 42.5, 1e-9));
    }
    for p in tooth.lower_arc_1.iter().chain(&tooth.lower_arc_2) {
        assert!(approx_eq(p.coords.norm(), 38.0, 1e-9));
    }

    assert_eq!(tooth.involute_1.len(), 10);
    assert_eq!(tooth.upper_arc.len(), 5);
    assert_eq!(tooth.lower_arc_1.len(), 2);
    assert_eq!(tooth.lower_arc_2.len(), 2);
    assert_eq!(tooth.external_arc.len(), 10);
}

#[test]
fn test_ring_rim_spans_one_pitch() {
    let tooth = generate_internal_tooth_profile(&GearSpecification::internal(40, 2.0, 20.0, 10.0))
        .expect("valid gear");
    let first = tooth.external_arc.first().expect("rim points");
    let last = tooth.external_arc.last().expect("rim points");
    let span = (angle_of(last) - angle_of(first)).rem_euclid(2.0 * PI);
    assert!(approx_eq(span, tooth.geometry.angular_pitch(), 1e-9));
}

#[test]
fn test_internal_walk_is_continuous() {
    for teeth in [12, 20, 30, 40, 72] {
        for shift in [-0.5, 0.0, 1.5] {
            let spec = GearSpecification::internal(teeth, 1.5, 20.0, 5.0).with_profile_shift(shift);
            let tooth = generate_internal_tooth_profile(&spec).expect("valid ring gear");
            let context = format!("z={teeth} shift={shift}");
            let eps = 1e-6 * tooth.geometry.module;

            assert_chained(
                &[
                    &tooth.involute_1,
                    &tooth.upper_arc,
                    &tooth.involute_2,
                    &tooth.lower_arc_1,
                ],
                eps,
                &context,
            );
            assert_chained(&[&tooth.lower_arc_2, &tooth.involute_1], eps, &context);

            // closing lines join the land middles to the rim radially
            for line in tooth.closing_lines() {
                assert!(
                    approx_eq(angle_of(&line.start), angle_of(&line.end), 1e-9),
                    "{context}: closing line is not radial"
                );
            }
        }
    }
}

#[test]
fn test_internal_flanks_are_mirror_images() {
    let tooth = generate_internal_tooth_profile(&GearSpecification::internal(30, 2.0, 20.0, 6.0))
        .expect("valid gear");
    let rotation = tooth.geometry.tooth_rotation_angle;
    let second = tooth.involute_2.clone().reversed();
    assert_eq!(second.len(), tooth.involute_1.len());
    for (a, b) in tooth.involute_1.iter().zip(&second) {
        assert!(dist(&rotate(&mirror_x_axis(a), rotation), b) < 1e-9);
    }
}

#[test]
fn test_internal_requires_positive_rim() {
    let spec = GearSpecification::internal(40, 2.0, 20.0, 0.0);
    assert_eq!(
        generate_internal_tooth_profile(&spec).unwrap_err(),
        GearError::InvalidArgument(ArgumentError::RimThickness(0.0))
    );
}

#[test]
fn test_internal_suppression_keeps_tip_clear_of_base_circle() {
    let spec = GearSpecification::internal(12, 2.0, 20.0, 5.0).with_undercut_suppression(true);
    let tooth = generate_internal_tooth_profile(&spec).expect("valid gear");
    let g = &tooth.geometry;
    assert!(g.profile_shift > 0.0);
    assert!(g.base_radius <= g.addendum_radius + 1e-9);
}

// --------------------------------------------------------
//   Shared behaviour
// --------------------------------------------------------

#[test]
fn test_argument_errors() {
    let cases = [
        (
            GearSpecification::external(0, 2.0, 20.0),
            ArgumentError::TeethCount(0),
        ),
        (
            GearSpecification::external(20, -1.0, 20.0),
            ArgumentError::Module(-1.0),
        ),
        (
            GearSpecification::external(20, 2.0, -5.0),
            ArgumentError::PressureAngle(-5.0),
        ),
        (
            GearSpecification::external(20, 2.0, 20.0).with_profile_shift(Real::INFINITY),
            ArgumentError::ProfileShift(Real::INFINITY),
        ),
    ];
    for (spec, expected) in cases {
        for kind in [GearKind::External, GearKind::Internal] {
            let spec = GearSpecification {
                rim_thickness: 5.0,
                ..spec
            };
            assert_eq!(
                generate_tooth_profile(&spec, kind).unwrap_err(),
                GearError::InvalidArgument(expected.clone()),
                "{kind:?}"
            );
        }
    }
}

#[test]
fn test_generation_is_deterministic() {
    let spec = GearSpecification::external(23, 1.25, 20.0).with_profile_shift(0.3);
    let a = generate_tooth_profile(&spec, GearKind::External).expect("valid gear");
    let b = generate_tooth_profile(&spec, GearKind::External).expect("valid gear");
    assert_eq!(a, b);

    let spec = GearSpecification::internal(50, 1.0, 20.0, 4.0);
    let a = generate_tooth_profile(&spec, GearKind::Internal).expect("valid gear");
    let b = generate_tooth_profile(&spec, GearKind::Internal).expect("valid gear");
    assert_eq!(a, b);
}

#[test]
fn test_concurrent_generation() {
    let spec = GearSpecification::external(20, 2.0, 20.0);
    let reference = generate_tooth_profile(&spec, GearKind::External).expect("valid gear");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| generate_tooth_profile(&spec, GearKind::External)))
            .collect();
        for handle in handles {
            let profile = handle.join().expect("worker panicked").expect("valid gear");
            assert_eq!(profile, reference);
        }
    });
}

#[test]
fn test_segment_lookup_by_role() {
    let external = generate_tooth_profile(&GearSpecification::external(20, 2.0, 20.0), GearKind::External)
        .expect("valid gear");
    assert_eq!(external.kind(), GearKind::External);
    assert!(external.segment(SegmentRole::Trochoid1).is_some());
    assert!(external.segment(SegmentRole::ExternalArc).is_none());

    let internal: ToothProfile =
        generate_internal_tooth_profile(&GearSpecification::internal(40, 2.0, 20.0, 10.0))
            .expect("valid gear")
            .into();
    assert_eq!(internal.kind(), GearKind::Internal);
    let rim = internal
        .segment(SegmentRole::ExternalArc)
        .expect("ring gears have a rim");
    assert_eq!(rim.len(), 10);
    assert!(internal.segment(SegmentRole::LowerArc).is_none());
    assert!(SegmentRole::ExternalArc.is_arc());
    assert_eq!(SegmentRole::LowerArc2.name(), "lower_arc_2");
}
