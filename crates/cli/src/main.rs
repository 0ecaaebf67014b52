use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rihla_agents::PlannerAgent;
use rihla_catalog::Catalog;
use rihla_core::RegexQueryParser;
use rihla_narrative::Narrator;
use rihla_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "rihla")]
#[command(about = "Rihla itinerary planner CLI")]
struct Cli {
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build one plan from a free-text query and print it as JSON.
    Plan {
        query: String,
        #[arg(long)]
        seed: Option<u64>,
        /// Also print the narrated itinerary below the JSON.
        #[arg(long)]
        narrative: bool,
    },
    /// Prompt for queries in a loop and narrate each plan.
    Interactive,
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Debug, Subcommand)]
enum CatalogCommand {
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("rihla_cli");
    let cli = Cli::parse();

    let catalog = Arc::new(
        Catalog::load_from_dir(&cli.data_dir)
            .with_context(|| format!("failed loading datasets from {}", cli.data_dir.display()))?,
    );

    match cli.command {
        Command::Plan {
            query,
            seed,
            narrative,
        } => {
            let agent = build_agent(catalog, seed);
            let plan = agent.plan(&query)?;

            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "plan_id": plan.plan_id,
                    "parsed": plan.parsed,
                    "itinerary": plan.itinerary,
                }))?
            );

            if narrative {
                println!("\n{}", agent.narrate(&plan).await);
            }
        }
        Command::Interactive => run_interactive(build_agent(catalog, None)).await?,
        Command::Catalog { command } => match command {
            CatalogCommand::Stats => {
                println!("{}", serde_json::to_string_pretty(&catalog.stats())?);
            }
        },
    }

    Ok(())
}

async fn run_interactive(agent: PlannerAgent<RegexQueryParser>) -> Result<()> {
    println!("Rihla planner. Describe a trip, e.g. \"3 days in Dubai under 1500 AED\". Type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        match agent.plan(query) {
            Ok(plan) => println!("\n{}\n", agent.narrate(&plan).await),
            Err(error) => println!("cannot plan that: {error}\n"),
        }
    }

    Ok(())
}

fn build_agent(catalog: Arc<Catalog>, seed: Option<u64>) -> PlannerAgent<RegexQueryParser> {
    let agent = PlannerAgent::new(
        RegexQueryParser::new(),
        catalog,
        Arc::new(Narrator::from_env()),
        AppMetrics::shared(),
    );
    match seed {
        Some(seed) => agent.with_seed(seed),
        None => agent,
    }
}
