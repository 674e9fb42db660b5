// ABOUTME: Tool-invocation layer for tickler, exposing to-do operations as named tools.
// ABOUTME: Defines the Tool trait, an async tool registry, and the todo and course_recommender tools.

pub mod tool;
pub mod tools;

pub use tool::{Registry, Tool, ToolContent, ToolResult};
pub use tools::{CourseRecommenderTool, TodoTool, build_registry};
