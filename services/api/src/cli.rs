use crate::chat::{run_chat, ChatArgs};
use crate::quiz::{run_quiz, run_results, QuizArgs, ResultsArgs};
use crate::server;
use aracnidata::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Aracnidata",
    about = "Ley 21.719 compliance self-assessment service and terminal tools",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Answer the six-question compliance questionnaire in the terminal
    Quiz(QuizArgs),
    /// Print the results view for previously saved answers
    Results(ResultsArgs),
    /// Chat with the simulated compliance consultant
    Chat(ChatArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz(args) => run_quiz(args).await,
        Command::Results(args) => run_results(args),
        Command::Chat(args) => run_chat(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["aracnidata-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn results_requires_an_answers_file() {
        assert!(Cli::try_parse_from(["aracnidata-api", "results"]).is_err());
        let cli = Cli::try_parse_from(["aracnidata-api", "results", "--answers", "quiz.json"])
            .expect("parses");
        assert!(matches!(cli.command, Some(Command::Results(_))));
    }
}
