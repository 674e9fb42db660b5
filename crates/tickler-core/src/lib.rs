// ABOUTME: Core library for tickler, containing the to-do record model and static catalogues.
// ABOUTME: This crate defines the shared data model used across all tickler components.

pub mod course;
pub mod todo;

pub use course::{ExperienceLevel, UnknownLevel, recommend_course};
pub use todo::{Todo, TodoPatch, is_valid_text};
