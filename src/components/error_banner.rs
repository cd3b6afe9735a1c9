use cosmic::widget::{button, text};
use cosmic::{Element, theme};

use crate::message::Message;

/// Inline dismissible error message shared by the workflow forms. Clicking
/// it clears the message without touching the form data. Renders nothing
/// while there is no message.
pub fn error_banner(message: &str) -> Option<Element<'static, Message>> {
    if message.is_empty() {
        return None;
    }
    Some(
        button::custom(text::body(message.to_string()))
            .class(theme::Button::Destructive)
            .on_press(Message::DismissError)
            .into(),
    )
}
