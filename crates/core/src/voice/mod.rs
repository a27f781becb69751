mod catalog;

use crate::config::{
    DEFAULT_AUDIO_ENCODING, DEFAULT_LANGUAGE, DEFAULT_SAMPLE_RATE_HZ, DEFAULT_VOICE,
};
use crate::tts::TtsError;

pub use catalog::{VoiceCatalog, CATALOG};

/// A validated synthesis request. Only [`resolve`] builds one, so the
/// language is always a catalog key and the voice is always listed under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesisRequest {
    text: String,
    language_code: String,
    voice_name: String,
    audio_encoding: String,
    sample_rate_hertz: u32,
}

impl SynthesisRequest {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn voice_name(&self) -> &str {
        &self.voice_name
    }

    pub fn audio_encoding(&self) -> &str {
        &self.audio_encoding
    }

    pub fn sample_rate_hertz(&self) -> u32 {
        self.sample_rate_hertz
    }
}

/// Validates the caller's selection against [`CATALOG`] and fills in defaults.
///
/// Empty strings count as absent. Checks run in a fixed order and the first
/// failure wins:
/// text is required; with neither language nor voice the request falls back
/// to `en-US` / `en-US-Standard-B`; a voice needs a language; the language
/// must be in the catalog; a missing voice becomes the language's first
/// voice; the voice must belong to the language. Encoding defaults to
/// `LINEAR16` and a missing or zero sample rate to 16000 Hz.
pub fn resolve(
    text: &str,
    language: Option<&str>,
    voice: Option<&str>,
    format: Option<&str>,
    sample_rate: Option<u32>,
) -> Result<SynthesisRequest, TtsError> {
    if text.is_empty() {
        return Err(TtsError::Language(
            "text to convert is not defined".to_owned(),
        ));
    }

    let language = language.filter(|l| !l.is_empty());
    let voice = voice.filter(|v| !v.is_empty());

    let (language, voice) = match (language, voice) {
        (None, None) => (DEFAULT_LANGUAGE, Some(DEFAULT_VOICE)),
        (None, Some(_)) => {
            return Err(TtsError::Language(
                "voice defined without defining language".to_owned(),
            ))
        }
        (Some(language), voice) => (language, voice),
    };

    let voices = CATALOG.voices(language).ok_or_else(|| {
        TtsError::Language(format!("requested language {language} not available"))
    })?;

    let voice = match voice {
        Some(voice) => voice,
        None => voices.first().copied().ok_or_else(|| {
            TtsError::Language(format!("requested language {language} has no voices"))
        })?,
    };

    if !voices.contains(&voice) {
        return Err(TtsError::Language(format!(
            "requested language {language} does not have voice {voice}"
        )));
    }

    let audio_encoding = format
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_AUDIO_ENCODING);
    let sample_rate_hertz = sample_rate
        .filter(|rate| *rate != 0)
        .unwrap_or(DEFAULT_SAMPLE_RATE_HZ);

    Ok(SynthesisRequest {
        text: text.to_owned(),
        language_code: language.to_owned(),
        voice_name: voice.to_owned(),
        audio_encoding: audio_encoding.to_owned(),
        sample_rate_hertz,
    })
}
