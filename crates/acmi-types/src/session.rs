use serde::{Deserialize, Serialize};

/// Coalition side an object belongs to, per the `0,Color=` reference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Violet,
    Grey,
}

impl Color {
    /// The color an impacting weapon must have to count as a hit against
    /// this color: always the opposite side.
    pub fn opposing(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            _ => Color::Blue,
        }
    }

    pub fn parse(raw: &str) -> Option<Color> {
        match raw {
            "Red" => Some(Color::Red),
            "Blue" => Some(Color::Blue),
            "Violet" => Some(Color::Violet),
            "Grey" => Some(Color::Grey),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coalition {
    Enemies,
    Allies,
    Neutral,
    Neutrals,
}

impl Coalition {
    pub fn parse(raw: &str) -> Option<Coalition> {
        match raw {
            "Enemies" => Some(Coalition::Enemies),
            "Allies" => Some(Coalition::Allies),
            "Neutral" => Some(Coalition::Neutral),
            "Neutrals" => Some(Coalition::Neutrals),
            _ => None,
        }
    }
}

/// Terminal status recorded against a `session` row when the consumer loop
/// exits, independent of why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Running,
    Success,
    Error,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Running => "Running",
            SessionStatus::Success => "Success",
            SessionStatus::Error => "Error",
        }
    }
}

/// Session-level metadata parsed out of the `0,` reference-object headers,
/// persisted once `all_refs` becomes true.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Option<i32>,
    pub start_time: Option<chrono::NaiveDateTime>,
    pub datasource: Option<String>,
    pub author: Option<String>,
    pub file_version: Option<f32>,
    pub title: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub client_version: Option<String>,
    pub status: Option<String>,
}
