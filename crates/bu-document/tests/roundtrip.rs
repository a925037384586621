use bu_core::FormatVersion;
use bu_document::*;
use bu_units::{Kind, UnitExpression, UnitTerm};

fn kinetics_document() -> UnitDocument {
    UnitDocument {
        schema_version: LATEST_SCHEMA_VERSION,
        level: 3,
        version: 1,
        unit_definitions: vec![
            UnitDefinitionDef {
                id: "mM".to_string(),
                name: Some("millimolar".to_string()),
                units: vec![
                    UnitDef {
                        scale: Some(-3),
                        ..UnitDef::of(Kind::Mole)
                    },
                    UnitDef {
                        exponent: Some(-1.0),
                        ..UnitDef::of(Kind::Litre)
                    },
                ],
            },
            UnitDefinitionDef {
                id: "hour".to_string(),
                name: None,
                units: vec![UnitDef {
                    multiplier: Some(3600.0),
                    ..UnitDef::of(Kind::Second)
                }],
            },
        ],
    }
}

#[test]
fn roundtrip_yaml_empty_document() {
    let document = UnitDocument::new(FormatVersion::L2V4);
    validate_document(&document).unwrap();

    let path = std::env::temp_dir().join("bu_document_roundtrip_empty.yaml");
    save_yaml(&path, &document).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(document, loaded);
}

#[test]
fn roundtrip_yaml_definitions() {
    let document = kinetics_document();
    let path = std::env::temp_dir().join("bu_document_roundtrip_kinetics.yaml");
    save_yaml(&path, &document).unwrap();
    assert_eq!(load_yaml(&path).unwrap(), document);
}

#[test]
fn roundtrip_json_definitions() {
    let document = kinetics_document();
    let path = std::env::temp_dir().join("bu_document_roundtrip_kinetics.json");
    save_json(&path, &document).unwrap();
    assert_eq!(load(&path).unwrap(), document);
}

#[test]
fn expressions_survive_the_document_form() {
    let fv = FormatVersion::L3V1;
    let expression = UnitExpression::from_terms(
        fv,
        [
            UnitTerm::new(Kind::Mole, 1.0, -3, 1.0, fv).unwrap(),
            UnitTerm::new(Kind::Second, -1.0, 0, 60.0, fv).unwrap(),
        ],
    );
    let mut document = UnitDocument::new(fv);
    document.push_definition("mM_per_min", &expression);

    let path = std::env::temp_dir().join("bu_document_roundtrip_expression.yaml");
    save_yaml(&path, &document).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(loaded.resolve("mM_per_min").unwrap(), expression);
}

#[test]
fn resolve_falls_back_to_predefined_units() {
    let document = UnitDocument::new(FormatVersion::L2V4);
    let volume = document.resolve("volume").unwrap();
    assert!(volume.is_variant_of_volume());
    let second = document.resolve("second").unwrap();
    assert_eq!(second.get(0).unwrap().kind(), Kind::Second);
    assert!(matches!(
        document.resolve("fortnight"),
        Err(DocumentError::UnknownUnit { .. })
    ));
}

#[test]
fn expressions_lists_every_definition() {
    let document = kinetics_document();
    let all = document.expressions().unwrap();
    let ids: Vec<&str> = all.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, ["mM", "hour"]);
    assert!(all[0].1.is_variant_of_substance_per_volume());
    assert!(all[1].1.is_variant_of_time());
}
