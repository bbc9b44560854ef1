//! Zodiac Sign Enumeration
//!
//! The fixed twelve-sign vocabulary plus canonical pair ordering. Pairs are
//! unordered at submission time; `canonical_pair` fixes their storage order so
//! (A, B) and (B, A) land on the same key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used when joining a canonical pair into a grouping key.
pub const PAIR_SEPARATOR: &str = " + ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    #[serde(rename = "Áries")]
    Aries,
    #[serde(rename = "Touro")]
    Touro,
    #[serde(rename = "Gêmeos")]
    Gemeos,
    #[serde(rename = "Câncer")]
    Cancer,
    #[serde(rename = "Leão")]
    Leao,
    #[serde(rename = "Virgem")]
    Virgem,
    #[serde(rename = "Libra")]
    Libra,
    #[serde(rename = "Escorpião")]
    Escorpiao,
    #[serde(rename = "Sagitário")]
    Sagitario,
    #[serde(rename = "Capricórnio")]
    Capricornio,
    #[serde(rename = "Aquário")]
    Aquario,
    #[serde(rename = "Peixes")]
    Peixes,
}

impl Sign {
    /// All twelve signs in traditional zodiac order (form display order).
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Touro,
        Sign::Gemeos,
        Sign::Cancer,
        Sign::Leao,
        Sign::Virgem,
        Sign::Libra,
        Sign::Escorpiao,
        Sign::Sagitario,
        Sign::Capricornio,
        Sign::Aquario,
        Sign::Peixes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Aries => "Áries",
            Sign::Touro => "Touro",
            Sign::Gemeos => "Gêmeos",
            Sign::Cancer => "Câncer",
            Sign::Leao => "Leão",
            Sign::Virgem => "Virgem",
            Sign::Libra => "Libra",
            Sign::Escorpiao => "Escorpião",
            Sign::Sagitario => "Sagitário",
            Sign::Capricornio => "Capricórnio",
            Sign::Aquario => "Aquário",
            Sign::Peixes => "Peixes",
        }
    }

    /// Exact-match lookup against the twelve display names. No trimming or
    /// case folding: form selects submit the names verbatim.
    pub fn from_name(name: &str) -> Option<Sign> {
        Sign::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orders a pair lexicographically by display name (UTF-8 byte order, which
/// matches code-point order for this name set). Accented initials sort after
/// ASCII ones, so e.g. Áries lands after Virgem.
pub fn canonical_pair(a: Sign, b: Sign) -> (Sign, Sign) {
    if a.as_str() <= b.as_str() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Canonical grouping key for an unordered pair: sorted names joined by " + ".
pub fn pair_key(a: Sign, b: Sign) -> String {
    let (first, second) = canonical_pair(a, b);
    format!("{}{}{}", first.as_str(), PAIR_SEPARATOR, second.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_exact_matches() {
        assert_eq!(Sign::from_name("Áries"), Some(Sign::Aries));
        assert_eq!(Sign::from_name("Capricórnio"), Some(Sign::Capricornio));
        assert_eq!(Sign::from_name("Peixes"), Some(Sign::Peixes));

        assert_eq!(Sign::from_name("X"), None);
        assert_eq!(Sign::from_name("aries"), None);
        assert_eq!(Sign::from_name(" Touro"), None);
        assert_eq!(Sign::from_name(""), None);
    }

    #[test]
    fn test_canonical_pair_is_order_insensitive() {
        assert_eq!(
            canonical_pair(Sign::Touro, Sign::Libra),
            canonical_pair(Sign::Libra, Sign::Touro)
        );
        assert_eq!(canonical_pair(Sign::Libra, Sign::Touro), (Sign::Libra, Sign::Touro));
    }

    #[test]
    fn test_accented_names_sort_after_ascii() {
        // 'Á' is U+00C1, past every ASCII letter in byte order.
        assert_eq!(canonical_pair(Sign::Aries, Sign::Virgem), (Sign::Virgem, Sign::Aries));
        assert_eq!(pair_key(Sign::Aries, Sign::Virgem), "Virgem + Áries");
    }

    #[test]
    fn test_pair_key_symmetric() {
        assert_eq!(
            pair_key(Sign::Gemeos, Sign::Cancer),
            pair_key(Sign::Cancer, Sign::Gemeos)
        );
        assert_eq!(pair_key(Sign::Touro, Sign::Touro), "Touro + Touro");
    }
}
