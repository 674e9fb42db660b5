// ABOUTME: Static course catalogue keyed by learner experience level.
// ABOUTME: Backs the course_recommender tool with a fixed, side-effect-free lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Learner experience level accepted by the course recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }

    /// Name of the course recommended for this level.
    pub fn course(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Professional JavaScript Vasu",
            ExperienceLevel::Intermediate => "Professional React & Next.js",
            ExperienceLevel::Advanced => "Advanced Full-Stack Development",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown experience level: {0} (expected beginner, intermediate, or advanced)")]
pub struct UnknownLevel(pub String);

impl FromStr for ExperienceLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExperienceLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

/// Render the recommendation sentence for a level.
pub fn recommend_course(level: ExperienceLevel) -> String {
    format!("I recommend you take the {} course.", level.course())
}
