// ABOUTME: Module for tickler's domain tools implementing the Tool trait.
// ABOUTME: Provides a registry factory that creates and registers the todo and course_recommender tools.

mod course_recommender;
mod todo;

pub use course_recommender::CourseRecommenderTool;
pub use todo::{NOT_FOUND, TodoTool};

use tickler_store::TodoService;

use crate::tool::Registry;

/// Build a tool registry with every tickler tool registered.
pub async fn build_registry(service: TodoService) -> Registry {
    let registry = Registry::new();
    registry.register(TodoTool::new(service)).await;
    registry.register(CourseRecommenderTool).await;
    registry
}
