pub mod chat_model;
pub mod chatbot;
pub mod knowledge_store;
pub mod prompt_builder;
