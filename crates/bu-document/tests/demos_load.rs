use std::path::Path;

use bu_units::UnitClass;

fn demo(name: &str) -> bu_document::UnitDocument {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/units");
    let path = root.join(name);
    bu_document::load(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e))
}

#[test]
fn demos_load_and_validate() {
    for name in [
        "01_kinetics_l3.yaml",
        "02_legacy_l2v1.yaml",
        "03_level_one.json",
    ] {
        let document = demo(name);
        bu_document::validate_document(&document)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
        document
            .expressions()
            .unwrap_or_else(|e| panic!("Failed to build units of {}: {}", name, e));
    }
}

#[test]
fn kinetics_demo_classes() {
    let document = demo("01_kinetics_l3.yaml");
    let class_of = |id: &str| {
        let e = document.resolve(id).unwrap();
        UnitClass::ALL.into_iter().find(|c| c.matches(&e))
    };
    assert_eq!(class_of("mM"), Some(UnitClass::SubstancePerVolume));
    assert_eq!(class_of("minute"), Some(UnitClass::Time));
    assert_eq!(class_of("mM_per_s"), None);
}

#[test]
fn level_one_demo_uses_legacy_spellings() {
    let document = demo("03_level_one.json");
    let area = document.resolve("area_cm2").unwrap();
    assert!(area.is_variant_of_area());
    let per_liter = document.resolve("per_liter").unwrap();
    assert_eq!(per_liter.to_string(), "l^(-1)");
}
