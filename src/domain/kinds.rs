//! Closed vocabularies for content kinds, interaction actions, and devices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of catalog item an event refers to.
///
/// Each kind owns its own counter partition; see
/// [`crate::service::ContentCounterStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A standalone film.
    Movie,
    /// An episodic series.
    Series,
}

impl ContentKind {
    /// Returns the wire representation (`"movie"` / `"series"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

/// Interaction a viewer performed on a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionType {
    /// The item was shown to the viewer.
    View,
    /// The viewer clicked through to the item.
    Click,
    /// Playback started.
    Play,
    /// Playback reached the end.
    Complete,
}

impl ActionType {
    /// All action types, in declaration order.
    pub const ALL: [Self; 4] = [Self::View, Self::Click, Self::Play, Self::Complete];

    /// Returns the wire representation (`"VIEW"`, `"CLICK"`, ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "VIEW",
            Self::Click => "CLICK",
            Self::Play => "PLAY",
            Self::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("unknown action type: {s}"))
    }
}

/// Coarse client device category derived from the user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Phone-class device.
    Mobile,
    /// Anything with a user agent that is not phone-class.
    Desktop,
    /// No user agent was supplied.
    Unknown,
}

impl DeviceType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "desktop" => Ok(Self::Desktop),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown device type: {other}")),
        }
    }
}
