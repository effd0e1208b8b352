// src/services/knowledge_store.rs
use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }

    fn is_placeholder(&self) -> bool {
        self.question.trim().is_empty() && self.answer.trim().is_empty()
    }
}

/// Raised once at startup when the knowledge base cannot be built.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge base {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse knowledge base {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("knowledge entry #{index} has an empty question or answer")]
    IncompleteEntry { index: usize },

    #[error("duplicate knowledge question: {0}")]
    DuplicateQuestion(String),
}

/// Read-only question/answer pairs, kept in source order.
#[derive(Clone, Debug)]
pub struct KnowledgeStore {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeStore {
    /// The clinic's built-in entries.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                KnowledgeEntry::new(
                    "Nasıl randevu oluşturabilirim?",
                    "Sayfamızın sağ üst köşesinde bulunan 'Randevu Oluştur' butonu ile istediğiniz bölümden alanında uzman doktorlarımızdan randevu alabilirsiniz.",
                ),
                KnowledgeEntry::new(
                    "Randevumu nasıl iptal edebilirim?",
                    "Sayfamızın orta kısmında bulunan 'Randevularınız' kısmından iptal etmek istediğiniz randevuyu seçip iptal edebilirsiniz.",
                ),
                KnowledgeEntry::new(
                    "aynı gün randevu alabilir miyim",
                    "Evet, uygun doktor varsa aynı gün randevu verebiliyoruz.",
                ),
                KnowledgeEntry::new(
                    "hangi bölümleriniz var",
                    "Dahiliye, Kardiyoloji, Göğüs Hastalıkları, Ortopedi, Fizik Tedavi ve Genel Cerrahi polikliniklerimiz bulunmaktadır.",
                ),
            ],
        }
    }

    /// Validate entries. Fully blank entries are dropped; half-blank entries
    /// and repeated questions are rejected.
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Result<Self, KnowledgeError> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            if entry.is_placeholder() {
                tracing::warn!(index, "skipping blank knowledge entry");
                continue;
            }
            if entry.question.trim().is_empty() || entry.answer.trim().is_empty() {
                return Err(KnowledgeError::IncompleteEntry { index });
            }
            if !seen.insert(entry.question.trim().to_string()) {
                return Err(KnowledgeError::DuplicateQuestion(entry.question));
            }
            kept.push(entry);
        }

        Ok(Self { entries: kept })
    }

    /// Load a JSON array of `{ "question", "answer" }` objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Read {
            path: shown.clone(),
            source,
        })?;
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(&raw)
            .map_err(|source| KnowledgeError::Parse { path: shown.clone(), source })?;

        let store = Self::from_entries(entries)?;
        tracing::info!(path = %shown, entries = store.len(), "knowledge base loaded");
        Ok(store)
    }

    pub fn get_all(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
