//! Chat-style consultation. Replies are simulated: a fixed delay followed by a
//! canned answer that quotes the user's question. No inference happens here.

mod router;
mod session;

pub use router::consultation_router;
pub use session::{
    ChatMessage, ChatRole, Consultant, ConsultationSession, Exchange, QuickQuestion,
    DEFAULT_REPLY_DELAY, QUICK_QUESTIONS, WELCOME_MESSAGE,
};
