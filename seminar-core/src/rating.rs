//! Seminar feedback: three fixed dimensions scored 1 to 5.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SeminarError, SeminarResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingDimension {
    Skill,
    Quality,
    Usefulness,
}

impl RatingDimension {
    pub const ALL: [RatingDimension; 3] = [
        RatingDimension::Skill,
        RatingDimension::Quality,
        RatingDimension::Usefulness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RatingDimension::Skill => "Skill",
            RatingDimension::Quality => "Quality",
            RatingDimension::Usefulness => "Usefulness",
        }
    }

    pub fn question(self) -> &'static str {
        match self {
            RatingDimension::Skill => "How well did the speaker explain the topic?",
            RatingDimension::Quality => "How well was the seminar organized?",
            RatingDimension::Usefulness => "How useful was the seminar?",
        }
    }

    /// Labels for scores 1 through 5.
    pub fn option_labels(self) -> [&'static str; 5] {
        match self {
            RatingDimension::Skill | RatingDimension::Quality => {
                ["Poor", "Average", "Good", "Excellent", "Outstanding"]
            }
            RatingDimension::Usefulness => {
                ["Not at all", "Somewhat", "Very", "Extremely", "Absolutely"]
            }
        }
    }

    pub fn option_label(self, score: RatingScore) -> &'static str {
        self.option_labels()[usize::from(score.value() - 1)]
    }
}

impl fmt::Display for RatingDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A score between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RatingScore(u8);

impl RatingScore {
    pub fn new(value: u8) -> SeminarResult<Self> {
        if (1..=5).contains(&value) {
            Ok(RatingScore(value))
        } else {
            Err(SeminarError::InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingScore {
    type Error = SeminarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RatingScore::new(value)
    }
}

impl From<RatingScore> for u8 {
    fn from(score: RatingScore) -> u8 {
        score.0
    }
}

/// One rating per dimension; unset dimensions are sent as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub skill: Option<RatingScore>,
    pub quality: Option<RatingScore>,
    pub usefulness: Option<RatingScore>,
}

impl Rating {
    pub fn get(&self, dimension: RatingDimension) -> Option<RatingScore> {
        match dimension {
            RatingDimension::Skill => self.skill,
            RatingDimension::Quality => self.quality,
            RatingDimension::Usefulness => self.usefulness,
        }
    }

    pub fn set(&mut self, dimension: RatingDimension, score: Option<RatingScore>) {
        let slot = match dimension {
            RatingDimension::Skill => &mut self.skill,
            RatingDimension::Quality => &mut self.quality,
            RatingDimension::Usefulness => &mut self.usefulness,
        };
        *slot = score;
    }

    pub fn is_empty(&self) -> bool {
        RatingDimension::ALL.iter().all(|d| self.get(*d).is_none())
    }

    /// Request body for the rating endpoint.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({ "ratingData": self })
    }
}
