use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientKind {
    Classic,
    Fire,
    BlueWhite,
    Grayscale,
}

impl GradientKind {
    pub const ALL: &'static [Self] = &[Self::Classic, Self::Fire, Self::BlueWhite, Self::Grayscale];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Fire => "Fire gradient",
            Self::BlueWhite => "Blue-white gradient",
            Self::Grayscale => "Grayscale",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Fire => "fire",
            Self::BlueWhite => "blue-white",
            Self::Grayscale => "grayscale",
        }
    }
}

impl Default for GradientKind {
    fn default() -> Self {
        Self::Classic
    }
}

impl std::fmt::Display for GradientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl FromStr for GradientKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown gradient '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_array_has_default_first() {
        assert_eq!(GradientKind::ALL.first(), Some(&GradientKind::default()));
    }

    #[test]
    fn keys_parse_back_to_their_kind() {
        for &kind in GradientKind::ALL {
            assert_eq!(kind.key().parse::<GradientKind>(), Ok(kind));
        }

        assert!("rainbow".parse::<GradientKind>().is_err());
    }

    #[test]
    fn display_names_are_unique() {
        for (i, a) in GradientKind::ALL.iter().enumerate() {
            for b in &GradientKind::ALL[i + 1..] {
                assert_ne!(a.display_name(), b.display_name());
            }
        }
    }
}
