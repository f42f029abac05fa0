use std::io::{self, Write};
use std::sync::Arc;

use advisor_agents::{Orchestrator, QueryPlan};
use advisor_core::{hospitals_for, AgentKind, TravelerProfile};
use advisor_observability::{init_tracing, AppMetrics};
use advisor_search::config::DEFAULT_WHO_BASE_URL;
use advisor_search::{HealthStatsClient, LlmConfig, QueryService, SearchBackend};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "advisor")]
#[command(about = "Travel advisory assistant CLI")]
struct Cli {
    /// Overrides ADVISOR_LLM_MODEL.
    #[arg(long, env = "ADVISOR_LLM_MODEL", global = true)]
    model: Option<String>,

    #[arg(long, env = "ADVISOR_LLM_BASE_URL", global = true)]
    base_url: Option<String>,

    #[arg(
        long,
        env = "ADVISOR_WHO_BASE_URL",
        default_value = DEFAULT_WHO_BASE_URL,
        global = true
    )]
    who_base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Runs one agent against the profile.
    Ask {
        agent: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Runs every agent in registry order.
    All {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Prints the query an agent would send, without calling the service.
    Plan {
        agent: String,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    Chat,
    /// Looks up a WHO Global Health Observatory indicator.
    Who {
        indicator: String,
        /// ISO3 country code, e.g. USA.
        #[arg(long, conflicts_with = "filter")]
        country: Option<String>,
        #[arg(long)]
        filter: Option<String>,
    },
    Hospitals {
        country: String,
    },
}

#[derive(Debug, Clone, Default, Args)]
struct ProfileArgs {
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    nationality: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    /// Pre-existing health conditions, or "none".
    #[arg(long)]
    health: Option<String>,
    /// Planned stay in days.
    #[arg(long)]
    stay: Option<u32>,
    /// Nightly budget, e.g. "$0-50".
    #[arg(long)]
    budget: Option<String>,
    #[arg(long)]
    purpose: Option<String>,
    #[arg(long)]
    season: Option<String>,
}

impl ProfileArgs {
    fn into_profile(self) -> TravelerProfile {
        TravelerProfile {
            country: self.country,
            city: self.city,
            nationality: self.nationality,
            gender: self.gender,
            health_conditions: self.health,
            health_condition: None,
            planned_stay: self.stay,
            budget_range: self.budget,
            purpose: self.purpose,
            season: self.season,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("advisor_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Ask { agent, profile } => {
            let kind = AgentKind::parse(&agent).context("invalid agent name")?;
            let orchestrator = build_orchestrator(cli.model, cli.base_url)?;
            let output = orchestrator.dispatch(kind, &profile.into_profile()).await;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::All { profile } => {
            let orchestrator = build_orchestrator(cli.model, cli.base_url)?;
            let profile = profile.into_profile();
            for kind in orchestrator.kinds() {
                let output = orchestrator.dispatch(kind, &profile).await;
                println!("== {kind} ==\n{}\n", output.text());
            }
        }
        Command::Plan { agent, profile } => {
            let kind = AgentKind::parse(&agent).context("invalid agent name")?;
            let orchestrator = build_orchestrator(cli.model, cli.base_url)?;
            match orchestrator.preview(kind, &profile.into_profile()) {
                Some(QueryPlan::Search { query, detail, .. }) => {
                    println!("detail: {detail}\n\n{query}");
                }
                Some(QueryPlan::Answer(text)) => println!("(answered locally)\n\n{text}"),
                None => println!("No agent found for request type: {kind}"),
            }
        }
        Command::Chat => {
            let orchestrator = build_orchestrator(cli.model, cli.base_url)?;
            run_chat(&orchestrator).await?;
        }
        Command::Who {
            indicator,
            country,
            filter,
        } => {
            let client = HealthStatsClient::new(cli.who_base_url)
                .context("failed to build health statistics client")?;
            let report = match country {
                Some(iso3) => client.country(&iso3, &indicator).await,
                None => client.indicator(&indicator, filter.as_deref()).await,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Hospitals { country } => {
            let hospitals = hospitals_for(&country);
            if hospitals.is_empty() {
                println!("No hospitals listed for {country}.");
            }
            for name in hospitals {
                println!("- {name}");
            }
        }
    }

    Ok(())
}

fn build_orchestrator(
    model: Option<String>,
    base_url: Option<String>,
) -> Result<Orchestrator<SearchBackend>> {
    let mut config = LlmConfig::from_env();
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(base_url) = base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }

    let backend = SearchBackend::from_config(config).context("failed to build search backend")?;
    tracing::debug!(backend = backend.name(), "search backend ready");
    Ok(Orchestrator::new(Arc::new(backend), AppMetrics::shared()))
}

async fn run_chat(orchestrator: &Orchestrator<SearchBackend>) -> Result<()> {
    println!("Travel advisor chat mode. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }
        if message.is_empty() {
            continue;
        }

        let reply = orchestrator.chat(message).await;
        println!("\n{reply}\n");
    }

    Ok(())
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
    fn profile_flags_fill_the_profile() {
        let cli = Cli::parse_from([
            "advisor",
            "ask",
            "health",
            "--country",
            "India",
            "--gender",
            "female",
            "--stay",
            "12",
            "--health",
            "Asthma",
        ]);
        let Command::Ask { agent, profile } = cli.command else {
            panic!("expected ask");
        };
        let profile = profile.into_profile();

        assert_eq!(agent, "health");
        assert_eq!(profile.country(), Some("India"));
        assert!(profile.is_female());
        assert_eq!(profile.stay_days(), 12);
        assert_eq!(profile.health(), Some("Asthma"));
    }

    #[test]
    fn who_country_and_filter_are_exclusive() {
        let error = Cli::try_parse_from([
            "advisor",
            "who",
            "WHOSIS_000001",
            "--country",
            "USA",
            "--filter",
            "$filter=Dim1 eq 'SEX_FMLE'",
        ])
        .unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);

        assert!(Cli::try_parse_from(["advisor", "who", "WHOSIS_000001", "--country", "USA"]).is_ok());
    }
}
