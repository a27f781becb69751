/// Read-only table of the languages the synthesizer accepts and the voices
/// available for each. Voice order matters: the first entry is the default.
#[derive(Debug)]
pub struct VoiceCatalog {
    entries: &'static [(&'static str, &'static [&'static str])],
}

pub static CATALOG: VoiceCatalog = VoiceCatalog {
    entries: &[
        ("nl-NL", &["nl-NL-Standard-A"]),
        (
            "en-AU",
            &[
                "en-AU-Standard-A",
                "en-AU-Standard-B",
                "en-AU-Standard-C",
                "en-AU-Standard-D",
            ],
        ),
        (
            "en-GB",
            &[
                "en-GB-Standard-A",
                "en-GB-Standard-B",
                "en-GB-Standard-C",
                "en-GB-Standard-D",
            ],
        ),
        (
            "en-US",
            &[
                "en-US-Standard-B",
                "en-US-Standard-C",
                "en-US-Standard-D",
                "en-US-Standard-E",
                "en-US-Wavenet-A",
                "en-US-Wavenet-B",
                "en-US-Wavenet-C",
                "en-US-Wavenet-D",
                "en-US-Wavenet-E",
                "en-US-Wavenet-F",
            ],
        ),
        ("fr-FR", &["fr-FR-Standard-C", "fr-FR-Standard-D"]),
        (
            "fr-CA",
            &[
                "fr-CA-Standard-A",
                "fr-CA-Standard-B",
                "fr-CA-Standard-C",
                "fr-CA-Standard-D",
            ],
        ),
        ("de-DE", &["de-DE-Standard-A", "de-DE-Standard-B"]),
        ("ja-JP", &["ja-JP-Standard-A"]),
        ("pt-BR", &["pt-BR-Standard-A"]),
        ("es-ES", &["es-ES-Standard-A"]),
        ("sv-SE", &["sv-SE-Standard-A"]),
        ("tr-TR", &["tr-TR-Standard-A"]),
        (
            "cmn-TW",
            &[
                "cmn-TW-Wavenet-A-Alpha",
                "cmn-TW-Wavenet-B-Alpha",
                "cmn-TW-Wavenet-C-Alpha",
            ],
        ),
    ],
};

impl VoiceCatalog {
    pub fn voices(&self, language: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, voices)| *voices)
    }

    pub fn contains(&self, language: &str, voice: &str) -> bool {
        self.voices(language)
            .is_some_and(|voices| voices.contains(&voice))
    }

    pub fn default_voice(&self, language: &str) -> Option<&'static str> {
        self.voices(language).and_then(|voices| voices.first().copied())
    }

    /// Language codes in table order.
    pub fn languages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(lang, _)| *lang)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_keep_table_order() {
        let langs: Vec<_> = CATALOG.languages().collect();
        assert_eq!(langs.len(), 13);
        assert_eq!(langs.first(), Some(&"nl-NL"));
        assert_eq!(langs.last(), Some(&"cmn-TW"));
    }

    #[test]
    fn default_voice_is_first_entry() {
        for (lang, voices) in CATALOG.iter() {
            assert!(!voices.is_empty(), "{lang} has no voices");
            assert_eq!(CATALOG.default_voice(lang), Some(voices[0]));
        }
        assert_eq!(CATALOG.default_voice("fr-FR"), Some("fr-FR-Standard-C"));
        assert_eq!(CATALOG.default_voice("en-US"), Some("en-US-Standard-B"));
    }

    #[test]
    fn lookups_are_exact() {
        assert!(CATALOG.contains("en-GB", "en-GB-Standard-D"));
        assert!(!CATALOG.contains("en-GB", "en-US-Standard-B"));
        assert!(!CATALOG.contains("en-gb", "en-GB-Standard-A"));
        assert!(CATALOG.voices("xx-XX").is_none());
        assert!(CATALOG.default_voice("xx-XX").is_none());
    }
}
