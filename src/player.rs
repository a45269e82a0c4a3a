use std::fmt;

use enum_map::Enum;
use serde::{Deserialize, Serialize};


const MAX_NAME_LENGTH: usize = 40;

// Skill level on a five-star scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);
    pub const DEFAULT: Self = Self(3);

    pub fn value(self) -> u8 { self.0 }
    pub fn all() -> impl Iterator<Item = Rating> { (Self::MIN.0..=Self::MAX.0).map(Rating) }
}

impl Default for Rating {
    fn default() -> Self { Self::DEFAULT }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RatingError {
    OutOfRange(i64),
}

impl fmt::Display for RatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingError::OutOfRange(value) => write!(
                f,
                "rating must be between {} and {}, got {}",
                Rating::MIN.0,
                Rating::MAX.0,
                value
            ),
        }
    }
}

impl std::error::Error for RatingError {}

impl TryFrom<i64> for Rating {
    type Error = RatingError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN.0 as i64..=Self::MAX.0 as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;
    fn try_from(value: u8) -> Result<Self, Self::Error> { Rating::try_from(value as i64) }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self { rating.0 }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub rating: Rating,
}

impl Player {
    pub fn new(name: impl Into<String>, rating: Rating) -> Self {
        Player { name: name.into(), rating }
    }
}


// Display color of a team. Alternates with the team index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, Serialize, Deserialize)]
pub enum TeamColor {
    A,
    B,
}

impl TeamColor {
    pub fn for_index(team_index: usize) -> Self {
        if team_index % 2 == 0 { TeamColor::A } else { TeamColor::B }
    }
}


pub fn normalize_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() { None } else { Some(name.to_owned()) }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NameError {
    Empty,
    TooLong { max: usize },
    ControlCharacter,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Empty => write!(f, "player name must not be empty"),
            NameError::TooLong { max } => {
                write!(f, "player name must be at most {max} characters long")
            }
            NameError::ControlCharacter => {
                write!(f, "player name must not contain control characters")
            }
        }
    }
}

impl std::error::Error for NameError {}

// Returns the name in the form it should be stored in.
pub fn validate_player_name(name: &str) -> Result<String, NameError> {
    let name = normalize_name(name).ok_or(NameError::Empty)?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(NameError::TooLong { max: MAX_NAME_LENGTH });
    }
    if name.chars().any(char::is_control) {
        return Err(NameError::ControlCharacter);
    }
    Ok(name)
}
