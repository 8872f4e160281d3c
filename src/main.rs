//! Spana CLI - research assistant with search-grounded answers
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::bail;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use spana::agent::GeminiClient;
use spana::prefs::{Prefs, Theme};
use spana::{agent, keywords, render, ui, Config};

#[derive(Parser)]
#[command(name = "spana")]
#[command(author, version, about = "Research assistant with search-grounded answers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a research question and print the grounded answer
    Ask {
        /// The research query
        query: String,
    },
    /// Fetch the live-updates panel
    Updates,
    /// Set the color theme, or toggle it when no value is given
    Theme {
        /// "light" or "dark"
        value: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ask { query }) => {
            if query.trim().is_empty() {
                bail!("please enter a research query");
            }

            let config = Config::load()?;
            let prefs = Prefs::open(config.storage.path.join("prefs"))?;
            let theme = prefs.theme()?;
            render::init_colors();

            let client = GeminiClient::new(config.api_key()?)?.with_model(&config.agent.model);
            let prompt = agent::research_prompt(&config.agent.persona, query.trim());

            render::print_notice(theme, "Researching...");
            let answer = client.research(&prompt).await?;

            render::print_answer(theme, &answer.text);
            render::print_keyword_chart(theme, &keywords::analyze(&answer.text));
            render::print_sources(theme, &answer.sources);
        }
        Some(Commands::Updates) => {
            let config = Config::load()?;
            let prefs = Prefs::open(config.storage.path.join("prefs"))?;
            let theme = prefs.theme()?;
            render::init_colors();

            let client = GeminiClient::new(config.api_key()?)?.with_model(&config.agent.model);
            let updates = client.live_updates(&config.agent.topic).await?;
            render::print_updates(theme, &config.agent.topic, &updates);
        }
        Some(Commands::Theme { value }) => {
            let config = Config::load()?;
            let prefs = Prefs::open(config.storage.path.join("prefs"))?;

            let theme = match value {
                Some(value) => {
                    let theme: Theme = value.parse().map_err(anyhow::Error::msg)?;
                    prefs.set_theme(theme)?;
                    theme
                }
                None => prefs.toggle_theme()?,
            };
            println!("Theme set to {}", theme.as_str());
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "spana", &mut std::io::stdout());
        }
        None => {
            // Default: launch the interactive session
            let config = Config::load()?;
            let prefs = Prefs::open(config.storage.path.join("prefs"))?;
            ui::run(&config, &prefs).await?;
        }
    }

    Ok(())
}
