use super::types::{ChatKind, ChatSummary, Contact};

#[allow(clippy::too_many_arguments)]
fn chat(
    id: &str,
    name: &str,
    kind: ChatKind,
    last_message: &str,
    time: &str,
    unread: u32,
    members: Option<u32>,
    online: bool,
) -> ChatSummary {
    ChatSummary {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        last_message: last_message.to_string(),
        time: time.to_string(),
        unread,
        members,
        online,
    }
}

fn contact(id: &str, name: &str, status: &str, online: bool) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        status: status.to_string(),
        online,
    }
}

/// The conversation list. The first entry is the chat opened by default.
pub fn list_chats() -> Vec<ChatSummary> {
    vec![
        chat(
            "eco-warriors",
            "Eco Warriors",
            ChatKind::Group,
            "Let's organize a beach cleanup this weekend!",
            "10:42 AM",
            3,
            Some(28),
            true,
        ),
        chat(
            "zero-waste",
            "Zero Waste Living",
            ChatKind::Group,
            "Has anyone tried making their own cleaning products?",
            "Yesterday",
            0,
            Some(45),
            true,
        ),
        chat(
            "priya-sharma",
            "Priya Sharma",
            ChatKind::Direct,
            "Thanks for the sustainability tips!",
            "Yesterday",
            0,
            None,
            true,
        ),
        chat(
            "rahul-patel",
            "Rahul Patel",
            ChatKind::Direct,
            "I'll bring reusable bags to the community garden event.",
            "Monday",
            0,
            None,
            false,
        ),
        chat(
            "ananya-gupta",
            "Ananya Gupta",
            ChatKind::Direct,
            "How did you reduce your carbon footprint so much?",
            "Apr 15",
            0,
            None,
            true,
        ),
    ]
}

pub fn list_contacts() -> Vec<Contact> {
    vec![
        contact("priya-sharma", "Priya Sharma", "Reducing my plastic waste one day at a time", true),
        contact("rahul-patel", "Rahul Patel", "Community garden organizer", false),
        contact("ananya-gupta", "Ananya Gupta", "Passionate about renewable energy", true),
        contact("vikram-singh", "Vikram Singh", "Sustainable transportation advocate", true),
        contact("neha-reddy", "Neha Reddy", "Zero waste enthusiast", false),
        contact("arjun-kumar", "Arjun Kumar", "Climate activist", false),
        contact("meera-nair", "Meera Nair", "Vegan chef and blogger", true),
    ]
}

/// Chats whose name contains `query`, ignoring case. A blank query keeps all.
pub fn search_chats(query: &str) -> Vec<ChatSummary> {
    let needle = query.trim().to_lowercase();
    list_chats()
        .into_iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn find_chat(chat_id: &str) -> Option<ChatSummary> {
    list_chats().into_iter().find(|c| c.id == chat_id)
}
