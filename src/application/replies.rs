//! Reply templates for `/start`, `/id` and `/help`
//!
//! Every reply is a pure function of the sender and the chat it came from.

use crate::domain::entities::{IncomingMessage, OutgoingMessage};

const HELP_TEXT: &str = "🤖 <b>Ekehi Task Bot Help</b>\n\n\
This bot helps you verify your Telegram membership in the Ekehi app.\n\n\
<b>Commands:</b>\n\
/start - Get your Telegram ID (sent automatically)\n\
/id - Get your Telegram ID again\n\
/help - Show this help message\n\n\
<b>How to verify Telegram membership:</b>\n\
1. Open the Ekehi app\n\
2. Go to Social Tasks\n\
3. Find a Telegram task\n\
4. Click 'Complete'\n\
5. Come back to this bot and send /id\n\
6. Copy your ID and paste it in the Ekehi app\n\
7. Submit to verify";

/// Welcome reply with the sender's id and pasting instructions
pub fn handle_start(msg: &IncomingMessage) -> OutgoingMessage {
    let body = format!(
        "👋 Hello @{name}!\n\n\
         🎉 Welcome to Ekehi Task Bot!\n\n\
         🆔 Your Telegram User ID is: {id}\n\n\
         📋 How to use this ID:\n\
         1. Copy the ID above\n\
         2. Go back to the Ekehi app\n\
         3. Paste it in the Telegram verification screen\n\
         4. Submit to verify your membership\n\n\
         💡 Tip: Long press on the ID to copy it easily!",
        name = escape_html(msg.sender.handle()),
        id = code_span(msg.sender.id),
    );
    OutgoingMessage::rich(msg.chat_id, body)
}

/// Short reply with just the sender's id
pub fn handle_id(msg: &IncomingMessage) -> OutgoingMessage {
    let body = format!(
        "👤 @{name}\n\n\
         🆔 Your Telegram User ID is: {id}\n\n\
         📋 Copy this ID and paste it in the Ekehi app to verify your Telegram membership.",
        name = escape_html(msg.sender.handle()),
        id = code_span(msg.sender.id),
    );
    OutgoingMessage::rich(msg.chat_id, body)
}

/// Static help text. Only the chat id is read from `msg`.
pub fn handle_help(msg: &IncomingMessage) -> OutgoingMessage {
    OutgoingMessage::rich(msg.chat_id, HELP_TEXT)
}

/// Monospace span the client renders as tap-to-copy
pub fn code_span(id: i64) -> String {
    format!("<code>{id}</code>")
}

/// Escape the characters Telegram's HTML parse mode treats as markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Formatting, User};

    fn alice() -> User {
        User::new(123456789).with_username("alice")
    }

    #[test]
    fn start_greets_by_username() {
        let reply = handle_start(&IncomingMessage::private(alice(), "start"));

        assert!(reply.body.starts_with("👋 Hello @alice!"));
        assert!(reply.body.contains("<code>123456789</code>"));
        assert_eq!(reply.recipient_id, 123456789);
        assert_eq!(reply.formatting, Formatting::RichText);
    }

    #[test]
    fn start_matches_template() {
        let reply = handle_start(&IncomingMessage::private(User::new(5).with_username("bob"), "start"));
        let expected = "👋 Hello @bob!\n\n🎉 Welcome to Ekehi Task Bot!\n\n🆔 Your Telegram User ID is: <code>5</code>\n\n📋 How to use this ID:\n1. Copy the ID above\n2. Go back to the Ekehi app\n3. Paste it in the Telegram verification screen\n4. Submit to verify your membership\n\n💡 Tip: Long press on the ID to copy it easily!";
        assert_eq!(reply.body, expected);
    }

    #[test]
    fn id_matches_template() {
        let reply = handle_id(&IncomingMessage::private(User::new(42), "id"));
        let expected = "👤 @User\n\n🆔 Your Telegram User ID is: <code>42</code>\n\n📋 Copy this ID and paste it in the Ekehi app to verify your Telegram membership.";
        assert_eq!(reply.body, expected);
    }

    #[test]
    fn help_matches_template() {
        let reply = handle_help(&IncomingMessage::private(alice(), "help"));
        let expected = "🤖 <b>Ekehi Task Bot Help</b>\n\nThis bot helps you verify your Telegram membership in the Ekehi app.\n\n<b>Commands:</b>\n/start - Get your Telegram ID (sent automatically)\n/id - Get your Telegram ID again\n/help - Show this help message\n\n<b>How to verify Telegram membership:</b>\n1. Open the Ekehi app\n2. Go to Social Tasks\n3. Find a Telegram task\n4. Click 'Complete'\n5. Come back to this bot and send /id\n6. Copy your ID and paste it in the Ekehi app\n7. Submit to verify";
        assert_eq!(reply.body, expected);
    }

    #[test]
    fn id_uses_first_name_without_username() {
        let user = User::new(9).with_first_name("Ngozi");
        let reply = handle_id(&IncomingMessage::private(user, "id"));
        assert!(reply.body.contains("@Ngozi"));
    }

    #[test]
    fn markup_in_names_is_escaped() {
        let user = User::new(3).with_first_name("<b>Tom & Jerry</b>");
        let reply = handle_id(&IncomingMessage::private(user, "id"));
        assert!(reply.body.contains("@&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));
        assert_eq!(reply.body.matches("<code>").count(), 1);
    }

    #[test]
    fn help_lists_commands_and_walkthrough() {
        let reply = handle_help(&IncomingMessage::private(alice(), "help"));
        for cmd in ["/start", "/id", "/help"] {
            assert!(reply.body.contains(cmd));
        }
        assert!(reply.body.contains("7. Submit to verify"));
        assert_eq!(reply.formatting, Formatting::RichText);
    }

    #[test]
    fn help_ignores_sender() {
        let a = handle_help(&IncomingMessage::private(alice(), "help"));
        let b = handle_help(&IncomingMessage::private(User::new(1).with_first_name("Zed"), "help"));
        assert_eq!(a.body, b.body);
    }

    #[test]
    fn replies_go_to_chat_not_sender() {
        let msg = IncomingMessage::new(-100200, alice(), "id");
        assert_eq!(handle_id(&msg).recipient_id, -100200);
        assert_eq!(handle_help(&msg).recipient_id, -100200);
    }
}
