pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::quote::QuoteArgs;
use commands::recommend::RecommendArgs;

#[derive(Debug, Parser)]
#[command(
    name = "safari",
    about = "Safari booking operator CLI",
    long_about = "Operate the safari booking store: migrations, catalog seeding, config \
                  inspection, quoting, quiz recommendations and review moderation.",
    after_help = "Examples:\n  safari migrate\n  safari seed\n  \
                  safari quote --package maasai-mara-classic --residency resident --adults 2 --children 1\n  \
                  safari recommend --answer 1=relaxation --answer 2=couple\n  \
                  safari approve-review REV-1234"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic package catalog and verify every entry")]
    Seed,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Price a party for an active package")]
    Quote(QuoteArgs),
    #[command(about = "Score the active catalog against quiz answers")]
    Recommend(RecommendArgs),
    #[command(about = "Approve a submitted review so it is publicly listed")]
    ApproveReview {
        #[arg(help = "Id of the review to approve")]
        review_id: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => commands::config::run(),
        Command::Quote(args) => commands::quote::run(args),
        Command::Recommend(args) => commands::recommend::run(args),
        Command::ApproveReview { review_id } => commands::approve_review::run(&review_id),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
