/// One question to the model, as built by the prompt module
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRequest {
    pub model: String,
    pub max_tokens: u32,
    /// Lets the model search the web while answering
    pub web_search: bool,
    pub system: String,
    pub user_message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    /// Tool calls, search results and anything else that isn't prose
    NonText,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub segments: Vec<Segment>,
    pub stop_reason: Option<String>,
}

impl Reply {
    pub fn from_text(text: String) -> Self {
        Self {
            segments: vec![Segment::Text(text)],
            stop_reason: None,
        }
    }

    /// All text segments joined in order
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::NonText => None,
            })
            .collect()
    }
}
