use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingType {
    #[default]
    Video,
    Office,
    Phone,
}

impl MeetingType {
    pub fn all() -> &'static [MeetingType] {
        &[MeetingType::Video, MeetingType::Office, MeetingType::Phone]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Office => "office",
            Self::Phone => "phone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "video" => Some(Self::Video),
            "office" => Some(Self::Office),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Video => "Video Call",
            Self::Office => "Office Visit",
            Self::Phone => "Phone Call",
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        match self {
            Self::Video => 45,
            Self::Office => 60,
            Self::Phone => 30,
        }
    }
}
