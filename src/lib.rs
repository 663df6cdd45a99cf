//! Cozy habit tracking with streaks, XP, levels, and an AI garden coach.
//!
//! Habits belong to one of six areas of life. Completing a habit on a day adds
//! 10 XP to that area and to the running total; undoing it takes the XP back.
//! Every 100 XP is a level. A generative-language model suggests new habits,
//! writes one short piece of daily wisdom, and plays "Sage", a gentle coach.
//!
//! | Area | Emoji |
//! |------|-------|
//! | Health | 🌿 |
//! | Career | 📘 |
//! | Spirituality | ✨ |
//! | Relationships | 💞 |
//! | Finances | 🪙 |
//! | Creativity | 🎨 |
//!
//! # Architecture
//!
//! - **Storage**: flat key-value store of JSON values, SQLite on disk or a map in memory
//! - **State**: [`garden::store::HabitStore`] applies events and writes through after each one
//! - **Advisor**: live Gemini backend or a disabled stand-in, chosen once at startup;
//!   every failure becomes a fixed fallback
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`error`] — Typed errors for the store and storage adapters
//! - [`storage`] — Key-value persistence port and its adapters
//! - [`garden`] — Habits, XP, daily wisdom cache, coaching chat, and growth views
//! - [`advisor`] — AI suggestions, wisdom, and coaching over a language model

pub mod advisor;
pub mod config;
pub mod error;
pub mod garden;
pub mod storage;
