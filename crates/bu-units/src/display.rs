//! Compact formula rendering: `mol*l^(-1)`, `(60*s)^2`, `μl`.

use core::fmt;

use bu_core::numeric::Real;

use crate::expression::UnitExpression;
use crate::term::UnitTerm;

/// SI prefix symbol for a power of ten, if one exists.
pub fn si_prefix(scale: i32) -> Option<&'static str> {
    let p = match scale {
        24 => "Y",
        21 => "Z",
        18 => "E",
        15 => "P",
        12 => "T",
        9 => "G",
        6 => "M",
        3 => "k",
        2 => "h",
        1 => "da",
        -1 => "d",
        -2 => "c",
        -3 => "m",
        -6 => "\u{03BC}",
        -9 => "n",
        -12 => "p",
        -15 => "f",
        -18 => "a",
        -21 => "z",
        -24 => "y",
        _ => return None,
    };
    Some(p)
}

fn number(v: Real) -> String {
    v.to_string()
}

impl fmt::Display for UnitTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind().symbol();
        let unit = match (self.scale(), si_prefix(self.scale())) {
            (0, _) => symbol.to_string(),
            (_, Some(prefix)) => format!("{prefix}{symbol}"),
            (s, None) => format!("10^({s})*{symbol}"),
        };
        let mut base = if self.multiplier() == 1.0 {
            unit
        } else {
            format!("{}*{unit}", number(self.multiplier()))
        };
        if self.offset() != 0.0 {
            base = format!("{}+{base}", number(self.offset()));
        }

        let exponent = self.exponent();
        if exponent == 1.0 {
            return f.write_str(&base);
        }
        let grouped = base.contains(['*', '+']);
        let power = if exponent < 0.0 {
            format!("({})", number(exponent))
        } else {
            number(exponent)
        };
        if grouped {
            write!(f, "({base})^{power}")
        } else {
            write!(f, "{base}^{power}")
        }
    }
}

impl fmt::Display for UnitExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

impl UnitTerm {
    /// Long form listing every attribute, e.g.
    /// `metre (exponent = 1, multiplier = 1, scale = 0)`.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "{} (exponent = {}, multiplier = {}, scale = {}",
            self.kind(),
            number(self.exponent()),
            number(self.multiplier()),
            self.scale()
        );
        if let Some(legacy) = self.legacy() {
            out.push_str(&format!(", offset = {}", number(legacy.offset)));
        }
        out.push(')');
        out
    }
}

impl UnitExpression {
    pub fn describe(&self) -> String {
        self.iter()
            .map(UnitTerm::describe)
            .collect::<Vec<_>>()
            .join(" * ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;
    use bu_core::FormatVersion;

    const FV: FormatVersion = FormatVersion::L3V1;

    fn t(kind: Kind, exponent: Real, scale: i32, multiplier: Real) -> UnitTerm {
        UnitTerm::new(kind, exponent, scale, multiplier, FV).unwrap()
    }

    #[test]
    fn prefixes_and_powers() {
        assert_eq!(t(Kind::Litre, 1.0, -6, 1.0).to_string(), "\u{03BC}l");
        assert_eq!(t(Kind::Joule, 1.0, 3, 1.0).to_string(), "kJ");
        assert_eq!(t(Kind::Metre, 2.0, 0, 1.0).to_string(), "m^2");
        assert_eq!(t(Kind::Litre, -2.0, 0, 1.0).to_string(), "l^(-2)");
        assert_eq!(t(Kind::Second, 1.0, 4, 1.0).to_string(), "10^(4)*s");
    }

    #[test]
    fn multipliers_group_under_exponent() {
        assert_eq!(t(Kind::Second, 2.0, 0, 60.0).to_string(), "(60*s)^2");
        assert_eq!(t(Kind::Second, 3.4, 0, 3600.0).to_string(), "(3600*s)^3.4");
        assert_eq!(t(Kind::Dimensionless, 3.0, 0, 4.0).to_string(), "(4*dimensionless)^3");
    }

    #[test]
    fn expressions_join_with_star() {
        let e = UnitExpression::from_terms(
            FV,
            [t(Kind::Mole, 1.0, 0, 1.0), t(Kind::Litre, -1.0, 0, 1.0)],
        );
        assert_eq!(e.to_string(), "mol*l^(-1)");
        assert_eq!(UnitExpression::new(FV).to_string(), "");
    }

    #[test]
    fn describe_lists_attributes() {
        assert_eq!(
            t(Kind::Metre, 1.0, 0, 1.0).describe(),
            "metre (exponent = 1, multiplier = 1, scale = 0)"
        );
    }
}
