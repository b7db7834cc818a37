/* defmt-rtt takes its lock through the critical-section crate, which needs
 * exactly one implementation linked into the firmware */

const MANIFEST: &str = include_str!("../Cargo.toml");

fn feature(name: &str) -> &'static str {
    let prefix = format!("{name} = [");

    MANIFEST
        .lines()
        .find(|line| line.starts_with(&prefix))
        .unwrap_or_else(|| panic!("no `{name}` feature in Cargo.toml"))
}

#[test]
fn defmt_brings_critical_section_impl() {
    let defmt = feature("defmt");

    assert!(defmt.contains("\"dep:defmt-rtt\""));
    assert!(defmt.contains("\"cortex-m/critical-section-single-core\""));
}

#[test]
fn host_build_stays_runtime_free() {
    assert_eq!(feature("default"), "default = []");
}
