// src/services/prompt_builder.rs
use std::str::FromStr;

use super::knowledge_store::KnowledgeEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locale {
    Turkish,
    English,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tr" | "turkish" | "türkçe" => Ok(Locale::Turkish),
            "en" | "english" => Ok(Locale::English),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Wording of the system turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    pub role: &'static str,
    pub directive: &'static str,
    pub heading: &'static str,
    pub question_label: &'static str,
    pub answer_label: &'static str,
    pub closing: &'static str,
}

impl PromptTemplate {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Turkish => Self::turkish(),
            Locale::English => Self::english(),
        }
    }

    pub fn turkish() -> Self {
        Self {
            role: "Sen bir klinik'in hem tıp bilgisi olan hemde klinik hakkında insanlara genel bilgi veren asistanısın. ",
            directive: "Aşağıdaki soru-cevap bilgi bankasını kullanarak kullanıcının sorularına cevap ver. Eğer soru bilgi bankasında yoksa, kibarca bilmediğini söyle.\n\n",
            heading: "BİLGİ BANKASI:\n",
            question_label: "Soru:",
            answer_label: "Cevap:",
            closing: "Kullanıcıya Türkçe, kibar ve yardımcı bir şekilde cevap ver.",
        }
    }

    pub fn english() -> Self {
        Self {
            role: "You are a clinic assistant with medical knowledge who also gives people general information about the clinic. ",
            directive: "Answer the user's questions using the question-answer knowledge base below. If the question is not in the knowledge base, politely say that you do not know.\n\n",
            heading: "KNOWLEDGE BASE:\n",
            question_label: "Question:",
            answer_label: "Answer:",
            closing: "Answer the user in English, politely and helpfully.",
        }
    }
}

/// Render the system instruction embedding every entry, in input order.
pub fn build_context(template: &PromptTemplate, entries: &[KnowledgeEntry]) -> String {
    let mut context = String::new();
    context.push_str(template.role);
    context.push_str(template.directive);
    context.push_str(template.heading);

    for entry in entries {
        context.push_str(&format!("{} {}\n", template.question_label, entry.question));
        context.push_str(&format!("{} {}\n\n", template.answer_label, entry.answer));
    }

    context.push_str(template.closing);
    context
}
