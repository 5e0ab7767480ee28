use super::model::{MessageRequest, Reply, Segment};
use serde::{Deserialize, Serialize};

const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
const WEB_SEARCH_TOOL_NAME: &str = "web_search";
const USER_ROLE: &str = "user";

#[derive(Debug, Serialize)]
pub struct MessagesBody<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolBody>,
    pub system: &'a str,
    pub messages: Vec<MessageBody<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ToolBody {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageBody<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> MessagesBody<'a> {
    pub fn from_model(request: &'a MessageRequest) -> Self {
        let tools = if request.web_search {
            vec![ToolBody {
                tool_type: WEB_SEARCH_TOOL_TYPE,
                name: WEB_SEARCH_TOOL_NAME,
            }]
        } else {
            Vec::new()
        };

        Self {
            model: &request.model,
            max_tokens: request.max_tokens,
            tools,
            system: &request.system,
            messages: vec![MessageBody {
                role: USER_ROLE,
                content: &request.user_message,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlockResponse>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<UsageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlockResponse {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UsageResponse {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl MessageResponse {
    pub fn to_model(self) -> Reply {
        Reply {
            segments: self
                .content
                .into_iter()
                .map(|block| match block {
                    ContentBlockResponse::Text { text } => Segment::Text(text),
                    ContentBlockResponse::Other => Segment::NonText,
                })
                .collect(),
            stop_reason: self.stop_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetailResponse,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetailResponse {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}
