//! Closed string enumerations
//!
//! Model output is untrusted, so every enumerated field is matched against an
//! exact, finite set of spellings. Unknown values are never defaulted.

/// An enumeration with a fixed set of wire spellings.
pub trait ClosedSet: Copy + Sized + 'static {
    /// Every member of the set, in declaration order.
    const VARIANTS: &'static [Self];

    /// Exact wire spelling of this value.
    fn as_str(self) -> &'static str;

    /// Parse an exact wire spelling. Case and whitespace are significant.
    #[must_use]
    fn from_wire(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == value)
    }

    /// All wire spellings joined by `separator`.
    #[must_use]
    fn choices(separator: &str) -> String {
        Self::VARIANTS
            .iter()
            .map(|variant| variant.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Declares an enum implementing [`ClosedSet`], `Display` and `Serialize`,
/// with one wire literal per variant.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $crate::ClosedSet for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::ClosedSet::as_str(*self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Archetype, ClosedSet, NodeKind, RiskLevel, ThreatLevel};

    #[test]
    fn from_wire_is_exact() {
        assert_eq!(ThreatLevel::from_wire("High"), Some(ThreatLevel::High));
        assert_eq!(ThreatLevel::from_wire("high"), None);
        assert_eq!(ThreatLevel::from_wire(" High"), None);
        assert_eq!(ThreatLevel::from_wire("Unknown"), None);
    }

    #[test]
    fn multi_word_spellings() {
        assert_eq!(
            Archetype::from_wire("Aggressive Incumbent"),
            Some(Archetype::AggressiveIncumbent)
        );
        assert_eq!(Archetype::FastFollower.to_string(), "Fast Follower");
    }

    #[test]
    fn choices_follow_declaration_order() {
        assert_eq!(RiskLevel::choices(" | "), "Low | Medium | High");
        assert_eq!(
            NodeKind::choices(", "),
            "input, process, decision, output, default"
        );
    }

    #[test]
    fn risk_levels_are_ordinal() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn every_variant_round_trips_through_its_spelling() {
        for kind in NodeKind::VARIANTS {
            assert_eq!(NodeKind::from_wire(kind.as_str()), Some(*kind));
        }
    }
}
