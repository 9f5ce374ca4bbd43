use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identity of an author, assigned sequentially from 1.
pub type AuthorId = i64;

/// Identity of a book, assigned sequentially from 1.
pub type BookId = i64;

/// Fixed genre enumeration used for book categories.
///
/// Genres serialize (and persist) as their display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Genre {
    Fantasy,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Dystopian,
    #[serde(rename = "Action & Adventure")]
    ActionAdventure,
    Mystery,
    Horror,
    #[serde(rename = "Thriller & Suspense")]
    ThrillerSuspense,
    #[serde(rename = "Historical Fiction")]
    HistoricalFiction,
    Romance,
    #[serde(rename = "Graphic Novel")]
    GraphicNovel,
    #[serde(rename = "Children’s")]
    Childrens,
    Biography,
    #[serde(rename = "Self-help")]
    SelfHelp,
    History,
    #[serde(rename = "True Crime")]
    TrueCrime,
    Essays,
}

impl Genre {
    /// Every genre, in declaration order.
    pub const ALL: [Genre; 16] = [
        Genre::Fantasy,
        Genre::ScienceFiction,
        Genre::Dystopian,
        Genre::ActionAdventure,
        Genre::Mystery,
        Genre::Horror,
        Genre::ThrillerSuspense,
        Genre::HistoricalFiction,
        Genre::Romance,
        Genre::GraphicNovel,
        Genre::Childrens,
        Genre::Biography,
        Genre::SelfHelp,
        Genre::History,
        Genre::TrueCrime,
        Genre::Essays,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Dystopian => "Dystopian",
            Genre::ActionAdventure => "Action & Adventure",
            Genre::Mystery => "Mystery",
            Genre::Horror => "Horror",
            Genre::ThrillerSuspense => "Thriller & Suspense",
            Genre::HistoricalFiction => "Historical Fiction",
            Genre::Romance => "Romance",
            Genre::GraphicNovel => "Graphic Novel",
            Genre::Childrens => "Children’s",
            Genre::Biography => "Biography",
            Genre::SelfHelp => "Self-help",
            Genre::History => "History",
            Genre::TrueCrime => "True Crime",
            Genre::Essays => "Essays",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.as_str() == value)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| Error::Decode(format!("unknown genre '{value}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_parse() {
        for genre in Genre::ALL {
            assert_eq!(Genre::parse(genre.as_str()), Some(genre));
        }
    }

    #[test]
    fn serde_uses_display_label() {
        let json = serde_json::to_string(&Genre::ActionAdventure).expect("serialize genre");
        assert_eq!(json, "\"Action & Adventure\"");
        let parsed: Genre = serde_json::from_str("\"Self-help\"").expect("parse genre");
        assert_eq!(parsed, Genre::SelfHelp);
    }

    #[test]
    fn unknown_label_is_a_decode_error() {
        let err = "Cookbooks".parse::<Genre>().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
