//! Conversion from teloxide types to relay_core types.

use relay_core::{Chat, HandlerError, Message, Platform, User};

/// Converts a teloxide User to a core [`User`].
pub fn to_core_user(user: &teloxide::types::User) -> User {
    User {
        id: user.id.0 as i64,
        username: user.username.clone(),
        first_name: Some(user.first_name.clone()),
    }
}

/// Converts a text message. Non-text messages (locations, photos, service messages) are rejected
/// with [`HandlerError::NoText`].
pub fn to_core_message(msg: &teloxide::types::Message) -> Result<Message, HandlerError> {
    let text = msg.text().ok_or(HandlerError::NoText)?;
    let user = msg.from.as_ref().map(to_core_user).unwrap_or(User {
        id: msg.chat.id.0,
        username: None,
        first_name: None,
    });
    Ok(Message {
        id: msg.id.to_string(),
        platform: Platform::Telegram,
        user,
        chat: Chat {
            id: msg.chat.id.0,
            chat_type: if msg.chat.is_private() {
                "private".to_string()
            } else {
                "public".to_string()
            },
        },
        content: text.to_string(),
        created_at: msg.date,
    })
}
