use crate::infra::{read_answers_file, write_answers_file, InMemoryProjectRepository};
use aracnidata::assessment::{AssessmentReport, QuestionnaireWalker};
use aracnidata::config::AppConfig;
use aracnidata::error::AppError;
use aracnidata::projects::{
    HttpProjectEvaluator, ProjectDescription, ProjectId, ProjectService, QuizSubmissionClient,
};
use aracnidata::telemetry;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[derive(Args, Debug, Default)]
pub(crate) struct QuizArgs {
    /// Project identifier sent with the answer summary (defaults to a timestamped id)
    #[arg(long)]
    pub(crate) project_id: Option<String>,
    /// Do not post the answer summary to the quiz intake endpoint
    #[arg(long)]
    pub(crate) offline: bool,
    /// Ask the evaluation backend to review the summary after showing results
    #[arg(long)]
    pub(crate) evaluate: bool,
    /// Save the answers as JSON so `results --answers` can reload them
    #[arg(long)]
    pub(crate) save: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ResultsArgs {
    /// JSON file written by `quiz --save`
    #[arg(long)]
    pub(crate) answers: PathBuf,
}

enum QuizInput {
    Quit,
    Back,
    Next,
    Choose(String),
}

impl QuizInput {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "q" | "salir" => Self::Quit,
            "a" | "anterior" => Self::Back,
            "" | "s" | "siguiente" => Self::Next,
            other => Self::Choose(other.to_string()),
        }
    }
}

pub(crate) async fn run_quiz(args: QuizArgs) -> Result<(), AppError> {
    let QuizArgs {
        project_id,
        offline,
        evaluate,
        save,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let project_id = ProjectId(
        project_id.unwrap_or_else(|| format!("proj-{}", Utc::now().timestamp_millis())),
    );
    let client = if offline {
        None
    } else {
        Some(QuizSubmissionClient::new(&config.submission.api_base)?)
    };

    let mut walker = QuestionnaireWalker::standard();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Evaluación de cumplimiento Ley 21.719");
    println!(
        "Escribe el número de una opción para responder, 's' para avanzar, 'a' para volver y 'q' para salir."
    );

    let answers = loop {
        render_question(&walker);
        let Some(line) = lines.next_line().await? else {
            println!("Evaluación interrumpida.");
            return Ok(());
        };

        match QuizInput::parse(&line) {
            QuizInput::Quit => {
                println!("Evaluación cancelada.");
                return Ok(());
            }
            QuizInput::Back => {
                walker.retreat();
            }
            QuizInput::Next => {
                if !walker.can_proceed() {
                    println!("Selecciona una opción para continuar.");
                    continue;
                }
                if !walker.is_last_step() {
                    walker.advance();
                    continue;
                }

                let answers = match walker.finalize() {
                    Ok(answers) => answers,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                if let Some(client) = &client {
                    // The client logs the failure; stay on the questionnaire.
                    if client.submit(&project_id, &answers).await.is_err() {
                        continue;
                    }
                }
                break answers;
            }
            QuizInput::Choose(choice) => {
                let question = walker.active_question();
                let field = question.field;
                let selected = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| index.checked_sub(1))
                    .and_then(|index| question.options.get(index))
                    .map(|option| option.value);

                match selected {
                    Some(value) => {
                        if let Err(err) = walker.record_answer(field, value) {
                            println!("{err}");
                        }
                    }
                    None => println!("Opción no válida: {choice}"),
                }
            }
        }
    };

    if let Some(path) = save {
        write_answers_file(&path, &answers)?;
        println!("Respuestas guardadas en {}", path.display());
    }

    render_report(&AssessmentReport::build(&answers));

    if evaluate {
        let service = ProjectService::new(
            Arc::new(InMemoryProjectRepository::default()),
            Arc::new(HttpProjectEvaluator::new(config.evaluator.endpoint.clone())),
        );
        let reply = service
            .evaluate(ProjectDescription {
                id: project_id,
                description: answers.summary(),
            })
            .await;
        println!("\nEvaluación del proyecto");
        println!("{}", reply.answer);
    }

    Ok(())
}

pub(crate) fn run_results(args: ResultsArgs) -> Result<(), AppError> {
    match read_answers_file(&args.answers)? {
        Some(answers) => render_report(&AssessmentReport::build(&answers)),
        None => {
            warn!(path = %args.answers.display(), "no readable answers found");
            println!("Aún no hay respuestas registradas.");
            println!("Completa el cuestionario con `aracnidata-api quiz --save <archivo>`.");
        }
    }
    Ok(())
}

fn render_question(walker: &QuestionnaireWalker) {
    let question = walker.active_question();
    let selected = walker.answers().selected(question.field);

    println!(
        "\nPregunta {} de {} · {}% completado",
        walker.current_step(),
        walker.total_steps(),
        walker.progress_percent()
    );
    println!("{}", question.title);
    println!("{}", question.prompt);
    for (index, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(option.value) { "x" } else { " " };
        println!("  [{marker}] {}. {}", index + 1, option.label);
    }

    let next = if walker.is_last_step() {
        "Ver Resultados"
    } else {
        "Siguiente"
    };
    println!("(s) {next}");
}

pub(crate) fn render_report(report: &AssessmentReport) {
    let score = &report.score;
    println!("\nResultados de tu evaluación");
    println!(
        "- Puntaje de cumplimiento: {}% ({} de {} puntos)",
        score.percentage, score.earned_points, score.max_points
    );
    println!("- Nivel de riesgo: {}", score.risk_label);
    println!(
        "- Completado: {} | Necesita mejora: {} | Crítico: {}",
        report.counts.completed, report.counts.needs_improvement, report.counts.critical
    );

    println!("\nRecomendaciones");
    for entry in &report.recommendations {
        println!(
            "- [{}] {}: {}",
            entry.priority_label, entry.title, entry.description
        );
    }

    println!("\nPróximos pasos");
    for (index, step) in report.next_steps.iter().enumerate() {
        println!("{}. {}", index + 1, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert!(matches!(QuizInput::parse("Q"), QuizInput::Quit));
        assert!(matches!(QuizInput::parse(" anterior "), QuizInput::Back));
        assert!(matches!(QuizInput::parse(""), QuizInput::Next));
        assert!(matches!(QuizInput::parse("2"), QuizInput::Choose(choice) if choice == "2"));
    }
}
