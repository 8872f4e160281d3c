//! Interactive research session.
//!
//! Mirrors the single-screen flow: live updates on start, suggested queries,
//! one research call per action, then follow-up actions on the answer.

use crate::agent::{self, GeminiClient};
use crate::config::Config;
use crate::keywords;
use crate::prefs::{Prefs, Theme};
use crate::render;
use crate::report::GroundedAnswer;
use crate::share::{OscClipboard, ShareOutcome, ShareSink};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

const FOLLOW_UPS: &[&str] = &[
    "Refine",
    "Summarize",
    "Share",
    "Toggle theme",
    "New query",
    "Quit",
];

/// Run the interactive session until the user quits.
pub async fn run(config: &Config, prefs: &Prefs) -> anyhow::Result<()> {
    render::init_colors();
    let mut theme = prefs.theme()?;
    let client = GeminiClient::new(config.api_key()?)?.with_model(&config.agent.model);

    // The updates panel loads first; a failure is an inline banner, not an abort.
    match client.live_updates(&config.agent.topic).await {
        Ok(updates) => render::print_updates(theme, &config.agent.topic, &updates),
        Err(e) => render::print_error("Update error", &e.to_string()),
    }

    let mut first_prompt = true;

    loop {
        if first_prompt && !config.agent.suggestions.is_empty() {
            render::print_notice(theme, "\nNot sure where to start? Try one of these:");
            for suggestion in &config.agent.suggestions {
                println!("  - {}", suggestion);
            }
        }

        let query: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Research query (Ctrl-C to quit)")
            .allow_empty(true)
            .interact_text()?;
        let query = query.trim().to_string();

        // Rejected locally; nothing is sent for an empty query.
        if query.is_empty() {
            render::print_error("Error", "Please enter a research query.");
            continue;
        }
        first_prompt = false;

        render::print_notice(theme, "Researching...");
        let mut answer = match client
            .research(&agent::research_prompt(&config.agent.persona, &query))
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                render::print_error("Error", &e.to_string());
                continue;
            }
        };

        present(theme, &answer);

        loop {
            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Next")
                .items(FOLLOW_UPS)
                .default(4)
                .interact()?;

            match FOLLOW_UPS[choice] {
                "Refine" | "Summarize" => {
                    let prompt = if FOLLOW_UPS[choice] == "Refine" {
                        agent::refine_prompt(&query, &answer.text)
                    } else {
                        agent::summarize_prompt(&answer.text)
                    };

                    render::print_notice(theme, "Researching...");
                    match client.research(&prompt).await {
                        Ok(mut follow_up) => {
                            // A follow-up without its own citations keeps the originals.
                            if follow_up.sources.is_empty() {
                                follow_up.sources = answer.sources.clone();
                            }
                            answer = follow_up;
                            present(theme, &answer);
                        }
                        Err(e) => render::print_error("Error", &e.to_string()),
                    }
                }
                "Share" => {
                    let payload = answer.share_text(&query);
                    match OscClipboard::stdout().share(&payload)? {
                        ShareOutcome::Copied => {
                            render::print_notice(theme, "Copied to clipboard.")
                        }
                        ShareOutcome::Unsupported => {
                            render::print_notice(
                                theme,
                                "Clipboard unavailable; payload follows.",
                            );
                            println!("{}", payload);
                        }
                    }
                }
                "Toggle theme" => {
                    theme = prefs.toggle_theme()?;
                    render::print_notice(theme, &format!("Theme: {}", theme.as_str()));
                }
                "New query" => break,
                _ => return Ok(()),
            }
        }
    }
}

fn present(theme: Theme, answer: &GroundedAnswer) {
    render::print_answer(theme, &answer.text);
    render::print_keyword_chart(theme, &keywords::analyze(&answer.text));
    render::print_sources(theme, &answer.sources);
}
