//! Player role on one side of a plate appearance.

use serde::{Deserialize, Serialize};

/// Which side of the plate appearance a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The hitter.
    Batter,
    /// The pitcher facing the hitter.
    Pitcher,
}

impl Role {
    /// Both roles, batter first.
    pub const ALL: [Self; 2] = [Self::Batter, Self::Pitcher];

    /// Lowercase label used in tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Batter => "batter",
            Self::Pitcher => "pitcher",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("batter") {
            Some(Self::Batter)
        } else if label.eq_ignore_ascii_case("pitcher") {
            Some(Self::Pitcher)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display() {
        assert_eq!(Role::Batter.to_string(), "batter");
        assert_eq!(Role::Pitcher.to_string(), "pitcher");
    }

    #[test]
    fn role_parse_label() {
        assert_eq!(Role::parse_label(" Batter"), Some(Role::Batter));
        assert_eq!(Role::parse_label("PITCHER"), Some(Role::Pitcher));
        assert_eq!(Role::parse_label("catcher"), None);
    }
}
