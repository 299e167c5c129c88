use std::fmt;

use crate::item::ValidationError;

/// Item category a catalog route is scoped to. The plural form is both
/// the path segment and the backing collection name; the singular form
/// appears in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Weapons,
    Rings,
    Armors,
    Spells,
    Miscs,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Weapons,
        Self::Rings,
        Self::Armors,
        Self::Spells,
        Self::Miscs,
    ];

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input {
            "weapons" => Ok(Self::Weapons),
            "rings" => Ok(Self::Rings),
            "armors" => Ok(Self::Armors),
            "spells" => Ok(Self::Spells),
            "miscs" => Ok(Self::Miscs),
            other => Err(ValidationError(format!("unknown category: {other}"))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weapons => "weapons",
            Self::Rings => "rings",
            Self::Armors => "armors",
            Self::Spells => "spells",
            Self::Miscs => "miscs",
        }
    }

    /// Collection the category's documents live in. One collection per
    /// category; documents from every title share it and are told apart
    /// by their `game` tag.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        self.as_str()
    }

    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Weapons => "weapon",
            Self::Rings => "ring",
            Self::Armors => "armor",
            Self::Spells => "spell",
            Self::Miscs => "misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
