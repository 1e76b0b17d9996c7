use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use crate::error::{AppError, Result};

/// Characters removed from a token before it is looked up.
const STRIPPED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

// Multi-word Urdu values are joined with U+200C (zero-width non-joiner) so one
// English token always becomes exactly one output token.
const BUILT_IN_ENTRIES: &[(&str, &str)] = &[
    ("the", "یہ"),
    ("and", "اور"),
    ("of", "کا"),
    ("to", "کو"),
    ("in", "میں"),
    ("is", "ہے"),
    ("for", "کے\u{200C}لیے"),
    ("with", "کے\u{200C}ساتھ"),
    ("this", "یہ"),
    ("that", "وہ"),
    ("blog", "بلاگ"),
    ("post", "پوسٹ"),
    ("article", "مضمون"),
    ("technology", "ٹیکنالوجی"),
    ("user", "صارف"),
    ("experience", "تجربہ"),
    ("design", "ڈیزائن"),
    ("development", "ترقی"),
    ("software", "سافٹ\u{200C}ویئر"),
    ("application", "ایپلیکیشن"),
    ("website", "ویب\u{200C}سائٹ"),
    ("data", "ڈیٹا"),
    ("information", "معلومات"),
    ("content", "مواد"),
    ("summary", "خلاصہ"),
    ("main", "اہم"),
    ("points", "نکات"),
    ("include", "شامل"),
    ("innovative", "جدید"),
    ("approaches", "طریقے"),
    ("practical", "عملی"),
    ("implementation", "نفاذ"),
    ("strategies", "حکمت\u{200C}عملیاں"),
];

/// Immutable English -> Urdu word table.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Builds a table, rejecting keys that are not lowercase alphabetic words and
    /// values that are empty or contain whitespace.
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = HashMap::new();
        for (key, value) in entries {
            let (key, value) = (key.into(), value.into());
            validate_entry(&key, &value)?;
            table.insert(key, value);
        }

        Ok(Self { entries: table })
    }

    pub fn built_in() -> Self {
        let entries = BUILT_IN_ENTRIES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self { entries }
    }

    /// The built-in table with entries from a JSON object file layered on top.
    pub fn with_overrides_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| AppError::Config(format!("Cannot open translation table {:?}: {}", path, e)))?;
        let overrides: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))?;

        let mut table = Self::built_in();
        for (key, value) in overrides {
            validate_entry(&key, &value)?;
            table.entries.insert(key, value);
        }

        Ok(table)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entry(key: &str, value: &str) -> Result<()> {
    if key.is_empty() || !key.chars().all(|c| c.is_alphabetic() && !c.is_uppercase()) {
        return Err(AppError::Config(format!(
            "Translation key {:?} must be a lowercase word without punctuation",
            key
        )));
    }

    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(AppError::Config(format!(
            "Translation for {:?} must be a single non-empty token",
            key
        )));
    }

    Ok(())
}

/// Word-by-word substitution translator.
#[derive(Debug, Clone)]
pub struct Translator {
    table: Arc<TranslationTable>,
}

impl Translator {
    pub fn new(table: Arc<TranslationTable>) -> Self {
        Self { table }
    }

    /// Replaces every whitespace-delimited token found in the table and keeps the
    /// rest verbatim, so the output has as many tokens as the input.
    pub fn translate(&self, text: &str) -> String {
        let translated: Vec<&str> = text
            .split_whitespace()
            .map(|token| {
                let key = lookup_key(token);
                self.table.get(&key).unwrap_or(token)
            })
            .collect();

        translated.join(" ")
    }
}

fn lookup_key(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        Translator::new(Arc::new(TranslationTable::built_in()))
    }

    #[test]
    fn translates_known_words_and_keeps_unknown() {
        let table = TranslationTable::new([
            ("the", "یہ"),
            ("blog", "بلاگ"),
            ("post", "پوسٹ"),
            ("is", "ہے"),
        ])
        .unwrap();
        let translator = Translator::new(Arc::new(table));

        assert_eq!(translator.translate("The blog post is great"), "یہ بلاگ پوسٹ ہے great");
    }

    #[test]
    fn punctuation_is_stripped_anywhere_in_the_token() {
        assert_eq!(translator().translate("Blog. po,st!"), "بلاگ پوسٹ");
    }

    #[test]
    fn fallback_keeps_original_case_and_punctuation() {
        assert_eq!(translator().translate("Hello, World! The"), "Hello, World! یہ");
    }

    #[test]
    fn whitespace_structure_collapses_to_single_spaces() {
        assert_eq!(translator().translate("  rust\n\n is\tfast  "), "rust ہے fast");
        assert_eq!(translator().translate(""), "");
    }

    #[test]
    fn token_count_is_preserved() {
        let translator = translator();
        let inputs = [
            "This blog post discusses software for website design and strategies.",
            "... ,, !? ;:",
            "for with software website strategies",
            "FOR, With! Software; Website: strategies?",
            "the\tblog\n\npost \r\n is\t\t great",
            "یہ بلاگ naïve café Straße 日本語 the",
            "",
            "   \n\t  ",
        ];

        for input in inputs {
            let output = translator.translate(input);
            assert_eq!(
                output.split_whitespace().count(),
                input.split_whitespace().count(),
                "token count changed for {:?} -> {:?}",
                input,
                output
            );
        }
    }

    #[test]
    fn built_in_entries_pass_validation() {
        let table = TranslationTable::new(BUILT_IN_ENTRIES.iter().copied()).unwrap();
        assert_eq!(table.len(), TranslationTable::built_in().len());
    }

    #[test]
    fn invalid_entries_are_rejected() {
        assert!(TranslationTable::new([("Blog", "بلاگ")]).is_err());
        assert!(TranslationTable::new([("blog.", "بلاگ")]).is_err());
        assert!(TranslationTable::new([("blog", "")]).is_err());
        assert!(TranslationTable::new([("for", "کے لیے")]).is_err());
    }

    #[test]
    fn overrides_are_layered_over_built_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urdu.json");
        std::fs::write(&path, r#"{"great": "زبردست", "blog": "بلاگز"}"#).unwrap();

        let table = TranslationTable::with_overrides_from_file(&path).unwrap();
        assert_eq!(table.get("great"), Some("زبردست"));
        assert_eq!(table.get("blog"), Some("بلاگز"));
        assert_eq!(table.get("post"), Some("پوسٹ"));
    }

    #[test]
    fn malformed_override_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urdu.json");
        std::fs::write(&path, "not json").unwrap();

        let err = TranslationTable::with_overrides_from_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
