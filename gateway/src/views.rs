// gateway/src/views.rs
use common::models::{ChatMessage, User};

/// Inline prompt shown on the landing view when the chat list is unavailable
pub const CHATS_UNAVAILABLE_PROMPT: &str =
    "Could not load your chats yet. Create a user to start chatting.";

/// Landing view, optionally with an inline prompt message
pub fn landing_page(prompt: Option<&str>) -> String {
    let notice = prompt
        .map(|p| format!("  <p class=\"notice\">{}</p>\n", escape(p)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Chat Relay</title></head>\n\
         <body>\n\
         \x20 <h1>Chat Relay</h1>\n\
         {notice}\
         \x20 <form method=\"post\" action=\"/user/new/\">\n\
         \x20   <label for=\"name\">Name</label>\n\
         \x20   <input id=\"name\" name=\"name\" type=\"text\">\n\
         \x20   <button type=\"submit\">Start chatting</button>\n\
         \x20 </form>\n\
         </body>\n\
         </html>\n"
    )
}

/// Chat view for a single user: their name and full chat log
pub fn chat_page(user: &User) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>{name} - Chat Relay</title></head>\n\
         <body>\n\
         \x20 <h1>Chatting with {name}</h1>\n\
         {log}\
         </body>\n\
         </html>\n",
        name = escape(&user.name),
        log = chat_log_list(&user.chats),
    )
}

/// Chat list view for the current caller
pub fn chat_list_page(chats: &[ChatMessage]) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Your chats - Chat Relay</title></head>\n\
         <body>\n\
         \x20 <h1>Your chats</h1>\n\
         {log}\
         \x20 <p><a href=\"/\">Back</a></p>\n\
         </body>\n\
         </html>\n",
        log = chat_log_list(chats),
    )
}

fn chat_log_list(chats: &[ChatMessage]) -> String {
    if chats.is_empty() {
        return "  <p class=\"empty\">No messages yet.</p>\n".to_string();
    }

    let mut list = String::from("  <ul class=\"chat-log\">\n");
    for message in chats {
        let author = if message.author_name.is_empty() {
            &message.author
        } else {
            &message.author_name
        };
        list.push_str(&format!(
            "    <li><span class=\"author\">{}</span>: {}</li>\n",
            escape(author),
            escape(&message.chat)
        ));
    }
    list.push_str("  </ul>\n");
    list
}

fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("hi")</script>"#),
            "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_landing_page_includes_prompt() {
        let page = landing_page(Some(CHATS_UNAVAILABLE_PROMPT));
        assert!(page.contains(CHATS_UNAVAILABLE_PROMPT));
        assert!(page.contains("/user/new/"));
    }

    #[test]
    fn test_chat_page_escapes_user_content() {
        let user = User {
            name: "<Dave>".to_string(),
            id: "abc123".to_string(),
            chats: vec![ChatMessage {
                chat: "hello & goodbye".to_string(),
                author: "abc123".to_string(),
                author_name: "<Dave>".to_string(),
            }],
        };

        let page = chat_page(&user);
        assert!(page.contains("&lt;Dave&gt;"));
        assert!(page.contains("hello &amp; goodbye"));
        assert!(!page.contains("<Dave>"));
    }

    #[test]
    fn test_empty_chat_log_renders_placeholder() {
        let page = chat_list_page(&[]);
        assert!(page.contains("No messages yet."));
    }
}
