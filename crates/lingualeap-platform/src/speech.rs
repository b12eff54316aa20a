//! Web Speech API adapter for reading English text aloud.

use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

use lingualeap_core::ports::SpeechPort;
use lingualeap_types::{LingoError, Result};

/// Voices that sound natural on common platforms, checked before any other English voice
pub const PREFERRED_VOICES: &[&str] = &["Samantha", "Google US English", "Zira"];

pub const SPEECH_LANG: &str = "en-US";

/// Name and language tag of an installed voice
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceInfo {
    pub name: String,
    pub lang: String,
}

impl VoiceInfo {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Index of the voice to use: the first English voice whose name is in
/// `preferred`, else the first voice tagged `en-*`. `None` leaves the
/// engine default in place.
pub fn select_voice(voices: &[VoiceInfo], preferred: &[&str]) -> Option<usize> {
    voices
        .iter()
        .position(|v| preferred.contains(&v.name.as_str()) && v.lang.starts_with("en"))
        .or_else(|| voices.iter().position(|v| v.lang.starts_with("en-")))
}

/// `SpeechPort` backed by `window.speechSynthesis`.
#[derive(Default)]
pub struct WebSpeech;

impl WebSpeech {
    pub fn new() -> Self {
        Self
    }

    fn synth() -> Option<SpeechSynthesis> {
        web_sys::window()?.speech_synthesis().ok()
    }

    /// Voices are loaded lazily by some browsers, so this is queried on every call.
    fn voices(synth: &SpeechSynthesis) -> Vec<SpeechSynthesisVoice> {
        synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect()
    }
}

impl SpeechPort for WebSpeech {
    fn speak(&self, text: &str) -> Result<()> {
        let synth = Self::synth()
            .ok_or_else(|| LingoError::Speech("Speech synthesis is not supported".to_string()))?;

        synth.cancel();

        let utterance = SpeechSynthesisUtterance::new_with_text(text)
            .map_err(|e| LingoError::JsInterop(format!("{:?}", e)))?;
        utterance.set_lang(SPEECH_LANG);
        utterance.set_pitch(1.0);
        utterance.set_rate(1.0);
        utterance.set_volume(1.0);

        let voices = Self::voices(&synth);
        let infos: Vec<VoiceInfo> = voices
            .iter()
            .map(|v| VoiceInfo::new(v.name(), v.lang()))
            .collect();
        if let Some(idx) = select_voice(&infos, PREFERRED_VOICES) {
            log::debug!("Speaking with voice {}", infos[idx].name);
            utterance.set_voice(Some(&voices[idx]));
        }

        synth.speak(&utterance);
        Ok(())
    }

    fn is_available(&self) -> bool {
        Self::synth().is_some()
    }
}
