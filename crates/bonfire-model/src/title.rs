// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::item::ValidationError;

/// Game title a catalog route is scoped to.
///
/// The path segment (`ds1`) and the tag stored on documents (`"1"`) are
/// different spellings of the same value; `game_tag` is what the server
/// stamps onto every stored item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Title {
    Ds1,
    Ds2,
    Ds3,
}

impl Title {
    pub const ALL: [Self; 3] = [Self::Ds1, Self::Ds2, Self::Ds3];

    /// Parses a path segment such as `ds2`. Anything outside the closed
    /// set is rejected; there is no case folding.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input {
            "ds1" => Ok(Self::Ds1),
            "ds2" => Ok(Self::Ds2),
            "ds3" => Ok(Self::Ds3),
            other => Err(ValidationError(format!("unknown title: {other}"))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ds1 => "ds1",
            Self::Ds2 => "ds2",
            Self::Ds3 => "ds3",
        }
    }

    /// Value of the `game` field stamped onto stored documents.
    #[must_use]
    pub const fn game_tag(self) -> &'static str {
        match self {
            Self::Ds1 => "1",
            Self::Ds2 => "2",
            Self::Ds3 => "3",
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Title;

    #[test]
    fn parses_every_known_title() {
        for title in Title::ALL {
            assert_eq!(Title::parse(title.as_str()), Ok(title));
        }
    }

    #[test]
    fn rejects_unknown_and_mixed_case_segments() {
        assert!(Title::parse("ds4").is_err());
        assert!(Title::parse("DS1").is_err());
        assert!(Title::parse("").is_err());
        let err = Title::parse("demon-souls").expect_err("segment outside the closed set");
        assert!(err.to_string().contains("unknown title"));
    }

    #[test]
    fn game_tags_match_title_numbers() {
        assert_eq!(Title::Ds1.game_tag(), "1");
        assert_eq!(Title::Ds2.game_tag(), "2");
        assert_eq!(Title::Ds3.game_tag(), "3");
    }
}
