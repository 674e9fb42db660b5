// ABOUTME: Implements the course_recommender tool answering with a fixed course per experience level.
// ABOUTME: Stateless; never touches the backing store.

use async_trait::async_trait;
use serde_json::{Value, json};
use tickler_core::{ExperienceLevel, recommend_course};

use crate::tool::{Tool, ToolResult};

#[derive(Debug, Clone, Default)]
pub struct CourseRecommenderTool;

#[async_trait]
impl Tool for CourseRecommenderTool {
    fn name(&self) -> &str {
        "course_recommender"
    }

    fn description(&self) -> &str {
        "Give a course recommendation based on experience level"
    }

    fn schema(&self) -> Value {
        let levels: Vec<&str> = ExperienceLevel::ALL.iter().map(|l| l.as_str()).collect();
        json!({
            "type": "object",
            "properties": {
                "experienceLevel": {
                    "type": "string",
                    "enum": levels,
                    "description": "The learner's experience level."
                }
            },
            "required": ["experienceLevel"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let Some(raw) = params.get("experienceLevel").and_then(|v| v.as_str()) else {
            return Ok(ToolResult::error("experienceLevel is required."));
        };

        match raw.parse::<ExperienceLevel>() {
            Ok(level) => Ok(ToolResult::text(recommend_course(level))),
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recommends_course_for_level() {
        let result = CourseRecommenderTool
            .execute(json!({ "experienceLevel": "advanced" }))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(
            result.joined_text(),
            "I recommend you take the Advanced Full-Stack Development course."
        );
    }

    #[tokio::test]
    async fn schema_lists_every_level() {
        let schema = CourseRecommenderTool.schema();
        assert_eq!(
            schema["properties"]["experienceLevel"]["enum"],
            json!(["beginner", "intermediate", "advanced"])
        );
    }

    #[tokio::test]
    async fn unknown_or_missing_level_is_an_error_result() {
        let result = CourseRecommenderTool
            .execute(json!({ "experienceLevel": "guru" }))
            .await
            .unwrap();
        assert!(result.is_error);

        let result = CourseRecommenderTool.execute(json!({})).await.unwrap();
        assert!(result.is_error);
        assert_eq!(result.joined_text(), "experienceLevel is required.");
    }
}
