use restyle_core::RestyleError;
use serde::{Deserialize, Serialize};

/// Built-in voices, plus `Custom` which requires both [`CustomVoice`] fields.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoicePreset {
    Sassy,
    PassiveAggressive,
    Pirate,
    Custom,
}

/// Free-text word pair for a custom voice. `noun` completes "You are a
/// {noun}..."; `adjective` completes "make this string more {adjective}...".
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CustomVoice {
    pub noun: Option<String>,
    pub adjective: Option<String>,
}

/// A resolved voice. Construction validates eagerly, so a `Voice` always has
/// both words and no remote call can start from a half-configured persona.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    noun: String,
    adjective: String,
}

impl Voice {
    pub fn new(preset: VoicePreset, custom: CustomVoice) -> Result<Self, RestyleError> {
        let (noun, adjective) = match preset {
            VoicePreset::Sassy => ("sassy person".to_string(), "sassy".to_string()),
            VoicePreset::PassiveAggressive => (
                "passive aggressive person".to_string(),
                "passive aggressive".to_string(),
            ),
            VoicePreset::Pirate => ("pirate".to_string(), "piratey".to_string()),
            VoicePreset::Custom => {
                let noun = custom.noun.filter(|noun| !noun.is_empty());
                let adjective = custom.adjective.filter(|adjective| !adjective.is_empty());
                match (noun, adjective) {
                    (Some(noun), Some(adjective)) => (noun, adjective),
                    _ => {
                        return Err(RestyleError::InvalidConfig(
                            "custom voice requires both a noun and an adjective".to_string(),
                        ))
                    }
                }
            }
        };
        Ok(Self { noun, adjective })
    }

    /// Resolves a built-in preset. `Custom` fails here since it needs words.
    pub fn preset(preset: VoicePreset) -> Result<Self, RestyleError> {
        Self::new(preset, CustomVoice::default())
    }

    pub fn noun(&self) -> &str {
        &self.noun
    }

    pub fn adjective(&self) -> &str {
        &self.adjective
    }
}
