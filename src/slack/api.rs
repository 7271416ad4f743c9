//! The Block Kit subset accepted by Slack incoming webhooks.

use serde::Serialize;

/// The outbound document: an ordered list of blocks, serialized as
/// `{"blocks": [...]}`.
#[derive(Debug, PartialEq, Serialize)]
pub struct Message {
    pub blocks: Vec<Block>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Header { text: Text },
    Context { elements: Vec<Text> },
    Section { text: Text },
    Divider,
}

impl Block {
    /// Header blocks only accept plain text.
    pub fn header(text: impl Into<String>) -> Block {
        Block::Header {
            text: Text::plain(text),
        }
    }

    pub fn context<I>(elements: I) -> Block
    where
        I: IntoIterator<Item = Text>,
    {
        Block::Context {
            elements: elements.into_iter().collect(),
        }
    }

    pub fn section(text: impl Into<String>) -> Block {
        Block::Section {
            text: Text::mrkdwn(text),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl Text {
    pub fn plain(text: impl Into<String>) -> Text {
        Text::PlainText { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Text {
        Text::Mrkdwn { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blocks_serialize_to_the_webhook_schema() {
        assert_eq!(
            serde_json::to_value(Block::header("Job Report")).unwrap(),
            json!({"type": "header", "text": {"type": "plain_text", "text": "Job Report"}})
        );
        assert_eq!(
            serde_json::to_value(Block::section("*bold*")).unwrap(),
            json!({"type": "section", "text": {"type": "mrkdwn", "text": "*bold*"}})
        );
        assert_eq!(
            serde_json::to_value(Block::context([Text::mrkdwn("a"), Text::mrkdwn("b")])).unwrap(),
            json!({"type": "context", "elements": [
                {"type": "mrkdwn", "text": "a"},
                {"type": "mrkdwn", "text": "b"},
            ]})
        );
        assert_eq!(
            serde_json::to_value(Block::Divider).unwrap(),
            json!({"type": "divider"})
        );
    }

    #[test]
    fn message_wraps_blocks_in_an_object() {
        let message = Message {
            blocks: vec![Block::Divider],
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"blocks": [{"type": "divider"}]})
        );
    }
}
