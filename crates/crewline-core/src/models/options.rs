//! Enumerated project options: experience level, reply deadline, and
//! notification preferences.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Required worker experience level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Experienced,
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "experienced" => Ok(ExperienceLevel::Experienced),
            _ => Err(format!("Invalid experience level: {s}")),
        }
    }
}

impl ExperienceLevel {
    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Experienced => "experienced",
        }
    }
}

/// How long invited workers have to reply before the invitation expires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReplyDeadline {
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "4hours")]
    FourHours,
    #[serde(rename = "1day")]
    OneDay,
}

impl FromStr for ReplyDeadline {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "30min" => Ok(ReplyDeadline::ThirtyMinutes),
            "1hour" => Ok(ReplyDeadline::OneHour),
            "4hours" => Ok(ReplyDeadline::FourHours),
            "1day" => Ok(ReplyDeadline::OneDay),
            _ => Err(format!("Invalid reply deadline: {s}")),
        }
    }
}

impl ReplyDeadline {
    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyDeadline::ThirtyMinutes => "30min",
            ReplyDeadline::OneHour => "1hour",
            ReplyDeadline::FourHours => "4hours",
            ReplyDeadline::OneDay => "1day",
        }
    }
}

/// A notification channel workers can be reached on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    InApp,
    Sms,
    VoiceCall,
}

impl NotificationChannel {
    /// Upper-cased name used in the submission payload.
    pub fn wire_name(&self) -> &'static str {
        match self {
            NotificationChannel::InApp => "IN_APP",
            NotificationChannel::Sms => "SMS",
            NotificationChannel::VoiceCall => "VOICE_CALL",
        }
    }
}

/// Per-channel notification toggles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    pub in_app: bool,
    pub sms: bool,
    pub voice_call: bool,
}

impl NotificationPrefs {
    /// Channels currently enabled, in a fixed display order.
    pub fn enabled_channels(&self) -> Vec<NotificationChannel> {
        let mut channels = Vec::new();
        if self.in_app {
            channels.push(NotificationChannel::InApp);
        }
        if self.sms {
            channels.push(NotificationChannel::Sms);
        }
        if self.voice_call {
            channels.push(NotificationChannel::VoiceCall);
        }
        channels
    }

    /// True when at least one channel is enabled.
    pub fn any_enabled(&self) -> bool {
        self.in_app || self.sms || self.voice_call
    }
}
