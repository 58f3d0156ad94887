//! estiquiz CLI: create quizzes, record interval answers, summarize.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::output::OutputFormat;

#[derive(Parser)]
#[command(name = "estiquiz", version, about = "Interval estimation quizzes")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a quiz from a question set
    New {
        /// Question set name
        set: String,
    },

    /// Answer a quiz and save the scored result
    Answer {
        /// Quiz name
        quiz: String,

        /// Respondent id (generated when omitted)
        #[arg(long)]
        respondent: Option<String>,

        /// JSON file with one {"low", "high"} object per question; reads stdin when omitted
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one respondent's result
    Results {
        /// Quiz name
        quiz: String,

        /// Respondent id
        respondent: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Combine every respondent of a quiz into extremes and means
    Summary {
        /// Quiz name
        quiz: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List question sets and quizzes
    List,

    /// Manage question sets
    Sets {
        #[command(subcommand)]
        command: SetsCommands,
    },

    /// Create starter config and example question set
    Init,
}

#[derive(Subcommand)]
enum SetsCommands {
    /// Split a question<TAB>answer file into shuffled question sets
    Import {
        /// Tab-separated source file
        tsv: PathBuf,

        /// Questions per set
        size: usize,

        /// Name sets <file-stem>-1, <file-stem>-2, ... instead of random names
        #[arg(long)]
        numbered: bool,
    },

    /// Give question set files unique random names
    Rename {
        /// Files to rename
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "estiquiz_core=info,estiquiz_store=info,estiquiz=info",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::New { set } => commands::new::execute(set, config),
        Commands::Answer {
            quiz,
            respondent,
            answers,
            format,
        } => commands::answer::execute(quiz, respondent, answers, format, config),
        Commands::Results {
            quiz,
            respondent,
            format,
        } => commands::results::execute(quiz, respondent, format, config),
        Commands::Summary { quiz, format } => commands::summary::execute(quiz, format, config),
        Commands::List => commands::list::execute(config),
        Commands::Sets { command } => match command {
            SetsCommands::Import {
                tsv,
                size,
                numbered,
            } => commands::sets::import(tsv, size, numbered, config),
            SetsCommands::Rename { files } => commands::sets::rename(files, config),
        },
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
