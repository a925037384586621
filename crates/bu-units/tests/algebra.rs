use bu_units::*;

const L3: FormatVersion = FormatVersion::L3V1;

fn term(kind: Kind, exponent: f64, scale: i32, multiplier: f64) -> UnitTerm {
    UnitTerm::new(kind, exponent, scale, multiplier, L3).unwrap()
}

fn expr(terms: impl IntoIterator<Item = UnitTerm>) -> UnitExpression {
    UnitExpression::from_terms(L3, terms)
}

#[test]
fn metres_merge_into_one_term() {
    let mut e = expr([term(Kind::Metre, 1.0, 0, 1.0), term(Kind::Metre, 2.0, 0, 1.0)]);
    e.simplify();
    assert_eq!(e, expr([term(Kind::Metre, 3.0, 0, 1.0)]));
}

#[test]
fn dimensionless_is_absorbed_unless_alone() {
    let mut e = expr([UnitTerm::dimensionless(L3), term(Kind::Metre, 1.0, 0, 1.0)]);
    e.simplify();
    assert_eq!(e.to_string(), "m");

    let mut alone = expr([UnitTerm::dimensionless(L3)]);
    alone.simplify();
    assert_eq!(alone.len(), 1);
    assert!(alone.get(0).unwrap().is_dimensionless());
}

#[test]
fn concentration_times_volume_is_amount() {
    let concentration = expr([term(Kind::Mole, 1.0, -3, 1.0), term(Kind::Litre, -1.0, 0, 1.0)]);
    let volume = expr([term(Kind::Litre, 1.0, 0, 1.0)]);
    let amount = product(&concentration, &volume);
    let derived = derive_units(&amount).unwrap();
    assert_eq!(derived, expr([term(Kind::Mole, 1.0, -3, 1.0)]));
    assert!(derived.is_variant_of_substance());
}

#[test]
fn rate_divided_by_time_is_not_a_rate() {
    let rate = expr([term(Kind::Mole, 1.0, 0, 1.0), term(Kind::Second, -1.0, 0, 1.0)]);
    assert!(rate.is_variant_of_substance_per_time());
    let second = expr([term(Kind::Second, 1.0, 0, 1.0)]);
    let per_second_squared = quotient(&rate, &second);
    assert!(!per_second_squared.is_variant_of_substance_per_time());
    assert_eq!(simplified(&per_second_squared).to_string(), "mol*s^(-2)");
}

#[test]
fn minutes_and_seconds_are_not_equivalent() {
    let minute = expr([term(Kind::Second, 1.0, 0, 60.0)]);
    let second = expr([term(Kind::Second, 1.0, 0, 1.0)]);
    assert!(!are_equivalent(&minute, &second));
    assert!(are_equivalent(&minute, &minute.clone()));
}

#[test]
fn hertz_is_equivalent_to_inverse_second() {
    let hz = expr([term(Kind::Hertz, 1.0, 0, 1.0)]);
    let per_s = expr([term(Kind::Second, -1.0, 0, 1.0)]);
    assert!(are_equivalent(&hz, &per_s));
    assert!(!are_identical(&hz, &per_s));
}

#[test]
fn watt_second_is_joule() {
    let ws = expr([term(Kind::Watt, 1.0, 0, 1.0), term(Kind::Second, 1.0, 0, 1.0)]);
    let j = expr([term(Kind::Joule, 1.0, 0, 1.0)]);
    assert!(are_equivalent(&ws, &j));
}

#[test]
fn invalid_propagates_through_products() {
    let unknown = UnitExpression::invalid(L3);
    let metre = expr([term(Kind::Metre, 1.0, 0, 1.0)]);
    let p = product(&metre, &unknown);
    assert!(p.is_invalid());
    assert!(are_compatible(&p, &expr([term(Kind::Second, 1.0, 0, 1.0)])));
}

#[test]
fn merge_rejects_incompatible_terms() {
    let mut s = term(Kind::Second, 1.0, 0, 1.0);
    let err = merge(&mut s, &term(Kind::Mole, 1.0, 0, 1.0)).unwrap_err();
    assert!(matches!(err, UnitError::InvalidUnitCombination { .. }));
}

#[test]
fn illegal_kind_leaves_term_unchanged() {
    let mut t = UnitTerm::of(Kind::Litre, FormatVersion::L2V4).unwrap();
    let err = t.set_kind(Kind::Liter).unwrap_err();
    assert_eq!(
        err,
        UnitError::InvalidUnitKind {
            kind: Kind::Liter,
            level: 2,
            version: 4
        }
    );
    assert_eq!(t.kind(), Kind::Litre);
}

#[test]
fn si_reduction_in_place() {
    let mut e = expr([term(Kind::Newton, 1.0, 3, 1.0)]);
    e.convert_to_si_units();
    let first = e.get(0).unwrap();
    assert_eq!((first.kind(), first.scale()), (Kind::Kilogram, 3));
    assert_eq!(e.len(), 3);
    assert!(are_equivalent(&e, &expr([term(Kind::Newton, 1.0, 3, 1.0)])));
}
