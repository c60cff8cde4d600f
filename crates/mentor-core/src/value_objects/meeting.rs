//! Meeting arrangement of an appointment
//!
//! A virtual meeting carries a link, a physical one a location. Modelling it
//! as a tagged enum makes "exactly one of link/location" hold by construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where and how the session takes place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "meeting_type", rename_all = "lowercase")]
pub enum Meeting {
    Virtual { meeting_link: String },
    Physical { location: String },
}

/// Discriminant of [`Meeting`], as it travels in requests and rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingType {
    Virtual,
    Physical,
}

impl Meeting {
    pub fn virtual_link(link: impl Into<String>) -> Self {
        Self::Virtual {
            meeting_link: link.into(),
        }
    }

    pub fn physical(location: impl Into<String>) -> Self {
        Self::Physical {
            location: location.into(),
        }
    }

    /// Build from a discriminant plus the two optional detail fields
    ///
    /// Returns `None` when the detail required by `kind` is absent or blank.
    pub fn from_parts(
        kind: MeetingType,
        meeting_link: Option<&str>,
        location: Option<&str>,
    ) -> Option<Self> {
        fn non_blank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }
        match kind {
            MeetingType::Virtual => non_blank(meeting_link).map(Self::virtual_link),
            MeetingType::Physical => non_blank(location).map(Self::physical),
        }
    }

    pub fn kind(&self) -> MeetingType {
        match self {
            Self::Virtual { .. } => MeetingType::Virtual,
            Self::Physical { .. } => MeetingType::Physical,
        }
    }

    pub fn meeting_link(&self) -> Option<&str> {
        match self {
            Self::Virtual { meeting_link } => Some(meeting_link),
            Self::Physical { .. } => None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Physical { location } => Some(location),
            Self::Virtual { .. } => None,
        }
    }

    /// The populated detail is non-blank
    pub fn is_complete(&self) -> bool {
        let detail = match self {
            Self::Virtual { meeting_link } => meeting_link,
            Self::Physical { location } => location,
        };
        !detail.trim().is_empty()
    }
}

impl MeetingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::Physical => "physical",
        }
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeetingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "virtual" => Ok(Self::Virtual),
            "physical" => Ok(Self::Physical),
            other => Err(format!("unknown meeting type '{other}'")),
        }
    }
}
