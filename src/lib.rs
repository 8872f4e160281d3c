//! # Spana
//!
//! A CLI research assistant with search-grounded answers.
//!
//! ## Features
//!
//! - **Grounded answers**: queries go to Gemini with Google Search grounding and come back with cited sources
//! - **Keyword frequency**: every answer gets a deterministic keyword chart, computed locally
//! - **Live updates**: a small panel of recent developments on a configured topic, parsed as structured JSON

pub mod agent;
pub mod config;
pub mod keywords;
pub mod prefs;
pub mod render;
pub mod report;
pub mod share;
pub mod ui;

pub use config::Config;
pub use keywords::{analyze, KeywordAnalyzer, KeywordCount};
pub use prefs::{Prefs, Theme};
pub use report::{GroundedAnswer, LiveUpdate, SourceRef};
