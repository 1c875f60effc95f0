use std::fmt;
use std::sync::Arc;

/// Locales the framework can render its own strings in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    English,
    German,
    French,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::English, Locale::German, Locale::French];

    /// Stable keys (option keys, type identifiers) are derived from this locale.
    pub const FALLBACK: Locale = Locale::English;

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::German => "de",
            Locale::French => "fr",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::German => "Deutsch",
            Locale::French => "Français",
        }
    }

    /// Accepts bare codes (`de`), regional codes (`de-CH`, `fr_FR.UTF-8`)
    /// and native names (`Deutsch`).
    pub fn from_code(raw: &str) -> Option<Locale> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(by_name) = Locale::ALL.iter().copied().find(|l| {
            l.native_name().eq_ignore_ascii_case(trimmed)
                || ascii_fold(l.native_name()).eq_ignore_ascii_case(trimmed)
        }) {
            return Some(by_name);
        }
        let language = trimmed
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        Locale::ALL.iter().copied().find(|l| l.code() == language)
    }

    /// Reads the POSIX locale variables in priority order.
    pub fn from_environment() -> Option<Locale> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .filter(|v| !v.is_empty() && v != "C" && v != "POSIX")
            .find_map(|v| Locale::from_code(&v))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::FALLBACK
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.native_name())
    }
}

/// A string resolved per locale by an injected function.
#[derive(Clone)]
pub struct Text(Arc<dyn Fn(Locale) -> String + Send + Sync>);

impl Text {
    pub fn new(resolve: impl Fn(Locale) -> String + Send + Sync + 'static) -> Self {
        Text(Arc::new(resolve))
    }

    /// Same string in every locale.
    pub fn fixed(value: impl Into<String>) -> Self {
        let value = value.into();
        Text::new(move |_| value.clone())
    }

    /// Table lookup; locales missing from the table use the first entry.
    pub fn table(entries: &[(Locale, &str)]) -> Self {
        let entries: Vec<(Locale, String)> =
            entries.iter().map(|(l, s)| (*l, s.to_string())).collect();
        Text::new(move |locale| {
            entries
                .iter()
                .find(|(l, _)| *l == locale)
                .or_else(|| entries.iter().find(|(l, _)| *l == Locale::FALLBACK))
                .or_else(|| entries.first())
                .map(|(_, s)| s.clone())
                .unwrap_or_default()
        })
    }

    pub fn resolve(&self, locale: Locale) -> String {
        (self.0)(locale)
    }

    /// The locale-independent form.
    pub fn key(&self) -> String {
        self.resolve(Locale::FALLBACK)
    }

    /// Every locale's rendition plus its ASCII-folded form, deduplicated.
    pub fn aliases(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for locale in Locale::ALL {
            let name = self.resolve(locale);
            let folded = ascii_fold(&name);
            for candidate in [name, folded] {
                if !candidate.is_empty() && !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
        out
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Text").field(&self.key()).finish()
    }
}

impl From<&'static str> for Text {
    fn from(value: &'static str) -> Self {
        Text::new(move |_| value.to_string())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::fixed(value)
    }
}

/// Strips diacritics from Latin letters and drops anything else outside ASCII.
pub fn ascii_fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        let base = match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
            'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "A",
            'æ' => "ae",
            'Æ' => "AE",
            'ç' => "c",
            'Ç' => "C",
            'è' | 'é' | 'ê' | 'ë' => "e",
            'È' | 'É' | 'Ê' | 'Ë' => "E",
            'ì' | 'í' | 'î' | 'ï' => "i",
            'Ì' | 'Í' | 'Î' | 'Ï' => "I",
            'ñ' => "n",
            'Ñ' => "N",
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
            'œ' => "oe",
            'Œ' => "OE",
            'ù' | 'ú' | 'û' | 'ü' => "u",
            'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
            'ý' | 'ÿ' => "y",
            'Ý' => "Y",
            'ß' => "ss",
            _ => "",
        };
        out.push_str(base);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_german_and_french_names() {
        assert_eq!(ascii_fold("ausführen"), "ausfuhren");
        assert_eq!(ascii_fold("Français"), "Francais");
        assert_eq!(ascii_fold("Straße"), "Strasse");
        assert_eq!(ascii_fold("•"), "");
    }

    #[test]
    fn locale_codes_and_names() {
        assert_eq!(Locale::from_code("de"), Some(Locale::German));
        assert_eq!(Locale::from_code("de-CH"), Some(Locale::German));
        assert_eq!(Locale::from_code("fr_FR.UTF-8"), Some(Locale::French));
        assert_eq!(Locale::from_code("Deutsch"), Some(Locale::German));
        assert_eq!(Locale::from_code("francais"), Some(Locale::French));
        assert_eq!(Locale::from_code("xx"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn table_falls_back_to_english() {
        let t = Text::table(&[(Locale::English, "run"), (Locale::German, "ausführen")]);
        assert_eq!(t.resolve(Locale::German), "ausführen");
        assert_eq!(t.resolve(Locale::French), "run");
        assert_eq!(t.key(), "run");
        assert_eq!(t.aliases(), vec!["run", "ausführen", "ausfuhren"]);
    }
}
