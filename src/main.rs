// main.rs
//
// Writes a few sample tooth profiles as SVG into ./svg, one file per profile.

use gearprofile::{GearKind, GearSpecification, ResolvedGearGeometry, generate_tooth_profile};
use std::fs;

fn report(name: &str, geometry: &ResolvedGearGeometry) {
    println!(
        "{name}: z={} m={} shift={:.4} pitch={:.3} base={:.3} tip={:.3} root={:.3}",
        geometry.teeth_count,
        geometry.module,
        geometry.profile_shift,
        geometry.pitch_radius,
        geometry.base_radius,
        geometry.addendum_radius,
        geometry.dedendum_radius,
    );
}

fn main() {
    // Ensure the /svg folder exists
    let _ = fs::create_dir_all("svg");

    let samples = [
        ("spur_20", GearKind::External, GearSpecification::external(20, 2.0, 20.0)),
        (
            "spur_12_suppressed",
            GearKind::External,
            GearSpecification::external(12, 2.0, 20.0).with_undercut_suppression(true),
        ),
        ("spur_60", GearKind::External, GearSpecification::external(60, 1.0, 20.0)),
        ("ring_40", GearKind::Internal, GearSpecification::internal(40, 2.0, 20.0, 10.0)),
        // base circle outside the shifted pitch circle: reported, nothing written
        (
            "invalid",
            GearKind::External,
            GearSpecification::external(6, 5.0, 28.0).with_profile_shift(-8.0),
        ),
    ];

    for (name, kind, spec) in samples {
        let profile = match generate_tooth_profile(&spec, kind) {
            Ok(profile) => profile,
            Err(error) => {
                eprintln!("{name}: {error}");
                continue;
            },
        };
        report(name, profile.geometry());

        #[cfg(feature = "svg-io")]
        {
            let path = format!("svg/{name}.svg");
            if let Err(error) = gearprofile::io::svg::write_svg(&profile, &path) {
                eprintln!("{name}: {error}");
            }
        }
    }
}
