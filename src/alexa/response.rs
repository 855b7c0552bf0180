use crate::session::SessionState;
use serde::{Deserialize, Serialize};

pub const ENVELOPE_VERSION: &str = "1.0";

/// Outbound webhook body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<SessionState>,
    pub response: ResponsePayload,
}

impl ResponseEnvelope {
    /// `session` is echoed as `sessionAttributes` unless absent or empty
    pub fn new(response: ResponsePayload, session: Option<SessionState>) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: session.filter(|s| !s.is_empty()),
            response,
        }
    }
}

/// Speech, reprompt, card and directives for one turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,

    /// `None` leaves the decision to the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl ResponsePayload {
    /// Empty acknowledgement
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn speech_text(&self) -> Option<&str> {
        self.output_speech.as_ref().map(OutputSpeech::text)
    }

    pub fn reprompt_text(&self) -> Option<&str> {
        self.reprompt.as_ref().map(|r| r.output_speech.text())
    }

    /// First directive, if any
    pub fn directive(&self) -> Option<&Directive> {
        self.directives.first()
    }

    pub fn ends_session(&self) -> bool {
        self.should_end_session.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
}

impl OutputSpeech {
    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    /// Prompts the user to link their media server account in the companion app
    LinkAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play", rename_all = "camelCase")]
    Play {
        play_behavior: PlayBehavior,
        audio_item: AudioItem,
    },

    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
}

impl Directive {
    /// Replace whatever is playing with `track`
    pub fn play(track: Track) -> Self {
        let metadata = AudioMetadata::from_track(&track);
        Directive::Play {
            play_behavior: PlayBehavior::ReplaceAll,
            audio_item: AudioItem {
                stream: Stream {
                    token: track.token,
                    url: track.url,
                    offset_in_milliseconds: track.offset_ms,
                },
                metadata,
            },
        }
    }

    pub fn stop() -> Self {
        Directive::Stop
    }

    pub fn stream(&self) -> Option<&Stream> {
        match self {
            Directive::Play { audio_item, .. } => Some(&audio_item.stream),
            Directive::Stop => None,
        }
    }

    pub fn metadata(&self) -> Option<&AudioMetadata> {
        match self {
            Directive::Play { audio_item, .. } => audio_item.metadata.as_ref(),
            Directive::Stop => None,
        }
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Directive::Play { .. })
    }
}

/// What to play and how to label it
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub url: String,
    pub token: String,
    pub offset_ms: u64,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub art_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayBehavior {
    ReplaceAll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioItem {
    pub stream: Stream,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AudioMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub token: String,
    pub url: String,
    pub offset_in_milliseconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadata {
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art: Option<Art>,
}

impl AudioMetadata {
    /// Metadata is only attached when at least one field is known
    fn from_track(track: &Track) -> Option<Self> {
        if track.title.is_none() && track.subtitle.is_none() && track.art_url.is_none() {
            return None;
        }

        Some(Self {
            title: track
                .title
                .clone()
                .unwrap_or_else(|| "Unknown Title".to_string()),
            subtitle: track
                .subtitle
                .clone()
                .unwrap_or_else(|| "AudioBookshelf".to_string()),
            art: track.art_url.clone().map(|url| Art {
                sources: vec![ArtSource { url }],
            }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Art {
    pub sources: Vec<ArtSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtSource {
    pub url: String,
}

/// Fluent construction of a [`ResponsePayload`]
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    payload: ResponsePayload,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.payload.output_speech = Some(OutputSpeech::PlainText { text: text.into() });
        self
    }

    /// Keeps the session open and re-asks with `text`
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.payload.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::PlainText { text: text.into() },
        });
        self
    }

    pub fn with_link_account_card(mut self) -> Self {
        self.payload.card = Some(Card::LinkAccount);
        self
    }

    pub fn add_directive(mut self, directive: Directive) -> Self {
        self.payload.directives.push(directive);
        self
    }

    pub fn with_should_end_session(mut self, end: bool) -> Self {
        self.payload.should_end_session = Some(end);
        self
    }

    pub fn build(self) -> ResponsePayload {
        self.payload
    }
}
