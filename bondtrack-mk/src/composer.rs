//! Marketing campaign composer
//!
//! The one place in the system that fans out concurrent gateway calls: one
//! generation per requested channel, all awaited together before the
//! campaign is assembled. A failed channel is reported per-channel and is
//! not retried automatically.

use serde::{Deserialize, Serialize};

use crate::gateway::{TaskKind, TextGenerator};

/// Delivery channel for campaign copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    Sms,
    Social,
}

impl Channel {
    /// Channel name for prompts and logging
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Social => "social",
        }
    }
}

/// Campaign brief supplied by the marketing screen
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignBrief {
    /// What the campaign is about
    pub subject: String,
    /// Who it addresses
    pub audience: String,
    /// Channels to generate copy for
    pub channels: Vec<Channel>,
}

/// Generated copy (or failure) for one channel
#[derive(Debug, Clone, Serialize)]
pub struct ChannelCopy {
    pub channel: Channel,
    /// Generated text, absent when this channel's call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
    /// Error code, present only when this channel's call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An assembled campaign
#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub subject: String,
    /// When composition finished
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub channels: Vec<ChannelCopy>,
}

/// Generate copy for every requested channel concurrently and await all
pub async fn compose(generator: &dyn TextGenerator, brief: &CampaignBrief) -> Campaign {
    tracing::info!(
        subject = %brief.subject,
        channels = brief.channels.len(),
        "Composing campaign"
    );

    let calls = brief.channels.iter().map(|&channel| async move {
        let context = format!(
            "Channel: {}. Subject: {}. Audience: {}.",
            channel.as_str(),
            brief.subject,
            brief.audience
        );
        match generator.generate(TaskKind::MarketingCopy, &context).await {
            Ok(copy) => ChannelCopy {
                channel,
                copy: Some(copy),
                error: None,
            },
            Err(e) => {
                tracing::warn!(channel = channel.as_str(), error = %e, "Channel generation failed");
                ChannelCopy {
                    channel,
                    copy: None,
                    error: Some(e.code().to_string()),
                }
            }
        }
    });

    let channels = futures::future::join_all(calls).await;

    Campaign {
        subject: brief.subject.clone(),
        generated_at: bondtrack_common::time::now(),
        channels,
    }
}
