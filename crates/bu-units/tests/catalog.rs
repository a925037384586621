use bu_units::*;

#[test]
fn predefined_volume_is_a_volume() {
    let volume = get_predefined_unit("volume", 2, 4).unwrap();
    let litre = volume.get(0).unwrap();
    assert_eq!(litre.kind(), Kind::Litre);
    assert_eq!((litre.exponent(), litre.scale(), litre.multiplier()), (1.0, 0, 1.0));
    assert!(is_variant_of_volume(&volume));
    assert!(expect_class(&volume, UnitClass::Volume).is_ok());
}

#[test]
fn every_predefined_name_has_its_class() {
    let cases = [
        ("substance", UnitClass::Substance),
        ("volume", UnitClass::Volume),
        ("area", UnitClass::Area),
        ("length", UnitClass::Length),
        ("time", UnitClass::Time),
    ];
    for (name, class) in cases {
        let unit = get_predefined_unit(name, 2, 4).unwrap();
        assert!(class.matches(&unit), "{name} should be a {class}");
        assert!(unit.matches_predefined(name));
    }
}

#[test]
fn level_one_lacks_area_and_length() {
    assert!(get_predefined_unit("area", 1, 2).is_none());
    assert!(get_predefined_unit("length", 1, 2).is_none());
    assert!(get_predefined_unit("substance", 1, 2).is_some());
}

#[test]
fn legal_kind_tables() {
    assert!(is_legal_kind("meter", 1, 2));
    assert!(!is_legal_kind("meter", 2, 1));
    assert!(is_legal_kind("celsius", 2, 1));
    assert!(!is_legal_kind("celsius", 2, 2));
    assert!(is_legal_kind("avogadro", 3, 2));
    assert!(!is_legal_kind("avogadro", 2, 5));
    assert_eq!(kinds_defined_in(2, 4).len(), 32);
    assert!(is_valid_format_version(3, 2));
    assert!(!is_valid_format_version(3, 3));
}

#[test]
fn predefined_names_are_not_unit_kinds() {
    assert!(is_predefined_name("time", 2));
    assert!(!is_unit_kind("time", 2, 4));
    assert!(is_unit_kind("second", 2, 4));
}

#[test]
fn attributes_follow_the_version() {
    let l3 = FormatVersion::L3V1;
    let mut elements = Vec::new();
    for (kind, exponent) in [("mole", "1"), ("litre", "-1")] {
        let mut a = Attributes::new();
        a.insert("kind".into(), kind.into());
        a.insert("exponent".into(), exponent.into());
        a.insert("scale".into(), "0".into());
        a.insert("multiplier".into(), "1".into());
        elements.push(a);
    }
    let e = read_expression(&elements, l3).unwrap();
    assert_eq!(e.to_string(), "mol*l^(-1)");
    assert!(e.is_variant_of_substance_per_volume());
    assert_eq!(write_expression(&e), elements);

    elements[1].remove("multiplier");
    let err = read_expression(&elements, l3).unwrap_err();
    assert_eq!(err, UnitError::MissingAttribute { name: "multiplier" });
}
