use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

pub const WELCOME_MESSAGE: &str = "¡Hola! Soy tu consultor especializado en cumplimiento legal para desarrollo de software. Puedo ayudarte con:\n\n• Implementación de medidas de ciberseguridad\n• Ejemplos de código específicos para tu contexto\n• Auditoría de sistemas existentes\n• Guías de cumplimiento legal\n\n¿En qué tipo de proyecto estás trabajando?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickQuestion {
    pub title: &'static str,
    pub question: &'static str,
}

/// Suggested prompts that prefill the chat input.
pub const QUICK_QUESTIONS: [QuickQuestion; 4] = [
    QuickQuestion {
        title: "Implementación de Encriptación",
        question: "¿Qué tipo de encriptación necesito para mi app que maneja datos de contacto?",
    },
    QuickQuestion {
        title: "Políticas de Privacidad",
        question: "¿Cómo debo redactar mi política de privacidad para cumplir la ley?",
    },
    QuickQuestion {
        title: "Auditoría de Seguridad",
        question: "¿Qué medidas de seguridad debo implementar para datos biométricos?",
    },
    QuickQuestion {
        title: "Mejores Prácticas",
        question: "¿Cuáles son las mejores prácticas para el almacenamiento seguro de datos?",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn welcome() -> Self {
        Self {
            id: "1".to_string(),
            role: ChatRole::Assistant,
            content: WELCOME_MESSAGE.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// A user message and the simulated reply it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub user: ChatMessage,
    pub assistant: ChatMessage,
}

/// Transcript of one consultation, opened with the welcome message.
///
/// Sending is split in two: [`ConsultationSession::begin`] appends the user
/// message and marks the session as waiting, [`ConsultationSession::complete`]
/// appends the reply. Callers that render a "typing" state read
/// [`ConsultationSession::is_pending`] in between.
#[derive(Debug, Clone)]
pub struct ConsultationSession {
    messages: Vec<ChatMessage>,
    awaiting: Option<String>,
}

impl ConsultationSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::welcome()],
            awaiting: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Append a user message. Blank input, or input while a reply is still
    /// pending, leaves the transcript untouched.
    pub fn begin(&mut self, input: &str) -> Option<&ChatMessage> {
        if self.is_pending() {
            return None;
        }
        let user = user_message(input)?;
        self.awaiting = Some(user.content.clone());
        self.messages.push(user);
        self.messages.last()
    }

    /// Append the canned reply to the pending question, if any.
    pub fn complete(&mut self) -> Option<&ChatMessage> {
        let question = self.awaiting.take()?;
        self.messages.push(assistant_message(&question));
        self.messages.last()
    }
}

impl Default for ConsultationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank input yields no message.
fn user_message(input: &str) -> Option<ChatMessage> {
    if input.trim().is_empty() {
        return None;
    }
    let now = Utc::now();
    Some(ChatMessage {
        id: now.timestamp_millis().to_string(),
        role: ChatRole::User,
        content: input.to_string(),
        timestamp: now,
    })
}

/// Reply ids are taken when the reply is produced: reply-time millis + 1.
fn assistant_message(question: &str) -> ChatMessage {
    let now = Utc::now();
    ChatMessage {
        id: (now.timestamp_millis() + 1).to_string(),
        role: ChatRole::Assistant,
        content: Consultant::canned_reply(question),
        timestamp: now,
    }
}

/// Simulated assistant answering after a fixed delay.
#[derive(Debug, Clone)]
pub struct Consultant {
    reply_delay: Duration,
}

impl Consultant {
    pub fn new(reply_delay: Duration) -> Self {
        Self { reply_delay }
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    pub fn canned_reply(message: &str) -> String {
        format!(
            "Entiendo tu consulta sobre \"{message}\". Basándome en el marco legal actual, te recomiendo:\n\n\
             1. **Análisis del contexto**: Primero necesito entender qué tipo de datos manejas\n\
             2. **Medidas específicas**: Implementar las protecciones adecuadas según el nivel de sensibilidad\n\
             3. **Código de ejemplo**: Te proporcionaré implementaciones prácticas\n\n\
             ¿Podrías contarme más detalles sobre tu aplicación? Por ejemplo:\n\
             - ¿Qué tipo de datos almacenas?\n\
             - ¿Es una app web, móvil o de escritorio?\n\
             - ¿Tienes usuarios registrados?"
        )
    }

    /// Produce a reply without a transcript; `None` for blank input.
    pub async fn exchange(&self, input: &str) -> Option<Exchange> {
        let user = user_message(input)?;
        tokio::time::sleep(self.reply_delay).await;
        let assistant = assistant_message(&user.content);
        Some(Exchange { user, assistant })
    }

    /// Begin, wait the reply delay, then complete. Blank input is ignored and
    /// leaves the transcript untouched.
    pub async fn send<'s>(
        &self,
        session: &'s mut ConsultationSession,
        input: &str,
    ) -> Option<&'s ChatMessage> {
        session.begin(input)?;
        debug!(delay_ms = self.reply_delay.as_millis() as u64, "consultant composing reply");

        tokio::time::sleep(self.reply_delay).await;

        session.complete()
    }
}

impl Default for Consultant {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}
