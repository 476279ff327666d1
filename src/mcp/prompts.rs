//! MCP prompts.

use std::collections::HashMap;

use async_trait::async_trait;
use pmcp::types::{Content, GetPromptResult, PromptInfo, PromptMessage, Role};
use pmcp::{Error, PromptHandler, RequestHandlerExtra};

/// Name of the recent-articles prompt
pub const RECENT_CATEGORY_PROMPT: &str = "recent-category";

const CATEGORY_ARGUMENT: &str = "category";

/// Asks the model to list last week's articles for a subject
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentCategoryPrompt;

impl RecentCategoryPrompt {
    /// The instruction text for `category`
    pub fn render(category: &str) -> String {
        format!(
            "Find the arXiv category for {}. If the category matches a general subject like math \
             or computer science, get the category for general articles within that field. \
             Search for 50 articles from the last week in that category. If none are found, try \
             expanding the time range to the last month, 6 months, or a year. Display them in a \
             table with columns for title, first author, ID, and PDF URL.",
            category
        )
    }

    /// Build the prompt result from arguments
    pub fn get(args: &HashMap<String, String>) -> Result<GetPromptResult, Error> {
        let category = args
            .get(CATEGORY_ARGUMENT)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::invalid_params("Missing 'category' argument"))?;

        Ok(GetPromptResult {
            description: Some(
                "Prompt to get articles from the last week for a specific category".to_string(),
            ),
            messages: vec![PromptMessage {
                role: Role::User,
                content: Content::Text {
                    text: Self::render(category),
                },
            }],
        })
    }
}

#[async_trait]
impl PromptHandler for RecentCategoryPrompt {
    async fn handle(
        &self,
        args: HashMap<String, String>,
        _extra: RequestHandlerExtra,
    ) -> Result<GetPromptResult, Error> {
        tracing::debug!(?args, "{} requested", RECENT_CATEGORY_PROMPT);
        Self::get(&args)
    }

    fn metadata(&self) -> Option<PromptInfo> {
        let info = serde_json::json!({
            "name": RECENT_CATEGORY_PROMPT,
            "description": "Get articles from the last week for a specific category",
            "arguments": [{
                "name": CATEGORY_ARGUMENT,
                "description": "The category to get articles from",
                "required": true
            }]
        });
        serde_json::from_value(info)
            .map_err(|e| tracing::warn!("Invalid prompt metadata: {}", e))
            .ok()
    }
}
