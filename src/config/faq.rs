use once_cell::sync::Lazy;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use log::info;

#[derive(Debug)]
pub enum FaqError {
    Empty,
    BlankQuestion(usize),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl fmt::Display for FaqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaqError::Empty => write!(f, "FAQ file contains no entries"),
            FaqError::BlankQuestion(idx) => write!(f, "FAQ entry {} has a blank question", idx),
            FaqError::IoError(e) => write!(f, "FAQ file IO error: {}", e),
            FaqError::JsonError(e) => write!(f, "FAQ JSON parsing error: {}", e),
        }
    }
}

impl Error for FaqError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FaqError::IoError(e) => Some(e),
            FaqError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FaqError {
    fn from(err: std::io::Error) -> Self {
        FaqError::IoError(err)
    }
}

impl From<serde_json::Error> for FaqError {
    fn from(err: serde_json::Error) -> Self {
        FaqError::JsonError(err)
    }
}

/// One canned question/answer pair. Entry order is the match order.
#[derive(Deserialize, Debug, Clone)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FaqConfig {
    pub entries: Vec<FaqEntry>,
    #[serde(default = "default_welcome")]
    pub welcome: String,
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(skip)]
    pub last_loaded: Option<SystemTime>,
}

fn default_welcome() -> String {
    "Hi there! How can I help you today? You can type your question or choose from the suggestions below.".to_string()
}

fn default_fallback() -> String {
    "I'm sorry, I didn't quite understand that. For more specific inquiries, please contact our support team directly through the contact form above.".to_string()
}

static DEFAULT_ENTRIES: Lazy<Vec<FaqEntry>> = Lazy::new(|| {
    vec![
        FaqEntry {
            question: "How do I sell my license?".to_string(),
            answer: "You can sell your license in 3 simple steps: 1) Upload your license details through our secure form, 2) Receive an instant valuation, 3) Get paid through your preferred payment method within 24 hours!".to_string(),
        },
        FaqEntry {
            question: "What software licenses do you accept?".to_string(),
            answer: "We accept a wide range of software licenses including Microsoft Office, Adobe Creative Cloud, AutoCAD, Windows OS, VMWare, Oracle, SAP, and many more enterprise and consumer software packages. If you're unsure, just ask us!".to_string(),
        },
        FaqEntry {
            question: "How long does payment take?".to_string(),
            answer: "Most payments are processed within 24 hours after license verification. For popular software titles, payments can be processed as quickly as same-day. We offer multiple payment methods including bank transfer, PayPal, and crypto.".to_string(),
        }
    ]
});

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENTRIES.clone(),
            welcome: default_welcome(),
            fallback: default_fallback(),
            last_loaded: None,
        }
    }
}

impl FaqConfig {
    fn validate(&self) -> Result<(), FaqError> {
        if self.entries.is_empty() {
            return Err(FaqError::Empty);
        }
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.question.trim().is_empty() {
                return Err(FaqError::BlankQuestion(idx));
            }
        }
        Ok(())
    }

    /// Questions in entry order, for the widget's suggestion chips.
    pub fn suggested_questions(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.question.clone())
            .collect()
    }
}

pub fn load_faq(path: &str) -> Result<Arc<FaqConfig>, Box<dyn Error + Send + Sync>> {
    let file_content = fs
        ::read_to_string(path)
        .map_err(|e| format!("Failed to read FAQ file '{}': {}", path, e))?;
    let mut config: FaqConfig = serde_json
        ::from_str(&file_content)
        .map_err(|e| format!("Failed to parse FAQ file '{}': {}", path, e))?;
    config.validate()?;
    config.last_loaded = Some(SystemTime::now());
    Ok(Arc::new(config))
}

/// Loads the FAQ file when present, otherwise falls back to the built-in
/// SoftSell question set.
pub fn load_faq_or_default(path: &str) -> Result<Arc<FaqConfig>, Box<dyn Error + Send + Sync>> {
    if Path::new(path).exists() {
        load_faq(path)
    } else {
        info!("FAQ file '{}' not found, using built-in question set", path);
        Ok(Arc::new(FaqConfig::default()))
    }
}

pub fn reload_faq_if_changed<P: AsRef<Path>>(
    path: P,
    current_config: &Arc<FaqConfig>
) -> Result<Option<Arc<FaqConfig>>, FaqError> {
    let metadata = fs::metadata(&path)?;

    if let Ok(modified) = metadata.modified() {
        if let Some(last_loaded) = current_config.last_loaded {
            if modified > last_loaded {
                info!("FAQ file changed, reloading...");
                let new_config = load_faq(path.as_ref().to_str().unwrap_or_default()).map_err(|e|
                    FaqError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
                )?;
                return Ok(Some(new_config));
            }
        } else {
            info!("No last_loaded timestamp, reloading FAQ...");
            let new_config = load_faq(path.as_ref().to_str().unwrap_or_default()).map_err(|e|
                FaqError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
            )?;
            return Ok(Some(new_config));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_defaults_cover_the_softsell_question_set() {
        let config = FaqConfig::default();
        assert_eq!(config.entries.len(), 3);
        assert_eq!(config.entries[0].question, "How do I sell my license?");
        assert!(config.welcome.starts_with("Hi there!"));
        assert!(config.fallback.contains("contact our support team"));
        config.validate().unwrap();
    }

    #[test]
    fn suggested_questions_preserve_entry_order() {
        let config = FaqConfig::default();
        let suggestions = config.suggested_questions();
        assert_eq!(suggestions[0], "How do I sell my license?");
        assert_eq!(suggestions[1], "What software licenses do you accept?");
        assert_eq!(suggestions[2], "How long does payment take?");
    }

    #[test]
    fn load_faq_reads_and_validates_a_json_file() {
        let path = std::env::temp_dir().join("softsell_faq_load_test.json");
        fs::write(
            &path,
            r#"{
                "entries": [
                    {"question": "Do you buy OEM keys?", "answer": "Yes, after verification."}
                ],
                "welcome": "Welcome!",
                "fallback": "Please email support."
            }"#
        ).unwrap();

        let config = load_faq(path.to_str().unwrap()).unwrap();
        assert_eq!(config.entries.len(), 1);
        assert_eq!(config.welcome, "Welcome!");
        assert!(config.last_loaded.is_some());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn load_faq_rejects_an_empty_entry_list() {
        let path = std::env::temp_dir().join("softsell_faq_empty_test.json");
        fs::write(&path, r#"{"entries": []}"#).unwrap();
        assert!(load_faq(path.to_str().unwrap()).is_err());
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_faq_or_default("/nonexistent/softsell-faq.json").unwrap();
        assert_eq!(config.entries.len(), 3);
    }

    #[test]
    fn reload_is_a_noop_when_the_file_is_unchanged() {
        let path = std::env::temp_dir().join("softsell_faq_reload_test.json");
        fs::write(
            &path,
            r#"{"entries": [{"question": "Q", "answer": "A"}]}"#
        ).unwrap();

        let config = load_faq(path.to_str().unwrap()).unwrap();
        let reloaded = reload_faq_if_changed(&path, &config).unwrap();
        assert!(reloaded.is_none());
        fs::remove_file(&path).ok();
    }
}
