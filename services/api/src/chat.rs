use aracnidata::config::AppConfig;
use aracnidata::consultation::{
    ChatMessage, ChatRole, Consultant, ConsultationSession, QUICK_QUESTIONS,
};
use aracnidata::error::AppError;
use aracnidata::telemetry;
use clap::Args;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args, Debug, Default)]
pub(crate) struct ChatArgs {
    /// Override the simulated reply delay in milliseconds
    #[arg(long)]
    pub(crate) delay_ms: Option<u64>,
}

pub(crate) async fn run_chat(args: ChatArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.consultation.reply_delay);
    let consultant = Consultant::new(delay);
    let mut session = ConsultationSession::new();

    for message in session.messages() {
        render_message(message);
    }
    println!("\nPreguntas rápidas:");
    for (index, quick) in QUICK_QUESTIONS.iter().enumerate() {
        println!("  {}. {}: {}", index + 1, quick.title, quick.question);
    }
    println!("Escribe tu consulta, el número de una pregunta rápida o 'q' para salir.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("salir") {
            break;
        }

        let text = quick_question(input).unwrap_or(input);
        if text.is_empty() {
            continue;
        }

        println!("Consultor escribiendo...");
        if let Some(reply) = consultant.send(&mut session, text).await {
            render_message(reply);
        }
    }

    Ok(())
}

fn quick_question(input: &str) -> Option<&'static str> {
    input
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| QUICK_QUESTIONS.get(index))
        .map(|quick| quick.question)
}

fn render_message(message: &ChatMessage) {
    let speaker = match message.role {
        ChatRole::User => "Tú",
        ChatRole::Assistant => "Consultor",
    };
    println!(
        "\n[{}] {speaker}:\n{}",
        message.timestamp.format("%H:%M"),
        message.content
    );
}
