use serde::{ Serialize, Deserialize };

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "chat")] Chat {
        content: String,
    },
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "response")] Response {
        content: String,
        timestamp: i64,
    },
    #[serde(rename = "error")] Error {
        message: String,
    },
    /// Is-composing indicator shown by the widget while a reply is pending.
    #[serde(rename = "typing")]
    Typing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_messages_carry_wire_tags_the_widget_expects() {
        let json = serde_json::to_string(&ServerMessage::Typing).unwrap();
        assert_eq!(json, r#"{"type":"typing"}"#);

        let json = serde_json::to_string(
            &(ServerMessage::Response { content: "hi".to_string(), timestamp: 7 })
        ).unwrap();
        assert!(json.starts_with(r#"{"type":"response""#));

        let parsed: ClientMessage = serde_json
            ::from_str(r#"{"type":"chat","content":"hello"}"#)
            .unwrap();
        let ClientMessage::Chat { content } = parsed;
        assert_eq!(content, "hello");
    }
}
