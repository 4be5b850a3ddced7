//! Core domain types for Questboard

mod task;

pub use task::{Column, Difficulty, Task};
