//! StudyForge: AI study aids with graceful fallbacks
//!
//! Turns learning content into flashcards, summaries, quizzes,
//! recommendations, chat replies, content analyses and study plans with a
//! single call to a hosted text-generation model. Every generation call
//! returns a usable value: unreadable replies and provider failures fall
//! back to fixed content for the requested kind.

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod provider;
pub mod stats;
