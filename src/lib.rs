//! Questboard - a three-column task board with a progress engine
//!
//! Tasks live in one of three columns (Do First, Do Later, Do Free). Completing
//! a task feeds it to the [`gamification::ProgressEngine`], which awards XP,
//! extends the daily streak, advances weekly quests and unlocks badges.
//!
//! ## Layout
//!
//! - [`domain`]: task, column and difficulty types
//! - [`gamification`]: pure rules plus the engine that applies them
//! - [`store`]: repository traits with SQLite and in-memory backends
//! - [`board`]: task CRUD on top of a store
//! - [`config`]: `~/.questboard/config.toml`

pub mod board;
pub mod config;
pub mod domain;
pub mod gamification;
pub mod store;

pub use domain::*;
