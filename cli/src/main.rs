use std::{fs, path::Path, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use battle_engine::{
    score, BattleResolver, BattleSession, Combatant, CombatantId, FixedDraw, InMemoryStats,
    RandomOrgClient, RandomnessSource, SeededDraws, SqliteMealStore, StatsRecorder,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Cmd {
    /// Print the battle score of every combatant in a JSON file
    Score {
        /// JSON array of combatants
        #[arg(long)]
        file: PathBuf,
    },
    /// Stage two combatants and resolve one battle
    Battle {
        /// JSON array with exactly two combatants; stats are kept in memory
        #[arg(long, conflicts_with_all = ["db", "first", "second"])]
        file: Option<PathBuf>,
        /// SQLite URL holding the meals table (falls back to DATABASE_URL)
        #[arg(long)]
        db: Option<String>,
        /// Id of the first meal to stage from the database
        #[arg(long, requires = "second")]
        first: Option<i64>,
        /// Id of the second meal to stage from the database
        #[arg(long, requires = "first")]
        second: Option<i64>,
        /// Draw from a seeded local generator instead of random.org
        #[arg(long, conflicts_with = "draw")]
        seed: Option<u64>,
        /// Use this fixed draw in [0, 1] instead of random.org
        #[arg(long)]
        draw: Option<f64>,
    },
}

#[derive(Parser)]
#[command(name = "meal-max")]
#[command(about = "Meal battle harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Score { file } => {
            for c in load_combatants(&file)? {
                println!("{} {}: {}", c.id(), c.name(), score(&c));
            }
        }
        Cmd::Battle {
            file,
            db,
            first,
            second,
            seed,
            draw,
        } => {
            let randomness: Arc<dyn RandomnessSource> = match (seed, draw) {
                (Some(seed), _) => Arc::new(SeededDraws::from_seed(seed)),
                (None, Some(value)) => Arc::new(FixedDraw::new(value)?),
                (None, None) => Arc::new(RandomOrgClient::from_env()?),
            };

            let session = BattleSession::new();
            let stats: Arc<dyn StatsRecorder> = match file {
                Some(file) => {
                    let combatants = load_combatants(&file)?;
                    if combatants.len() != 2 {
                        bail!(
                            "battle needs exactly two combatants, {} has {}",
                            file.display(),
                            combatants.len()
                        );
                    }
                    for c in combatants {
                        session.stage(c).await?;
                    }
                    Arc::new(InMemoryStats::new())
                }
                None => {
                    let url = db
                        .or_else(|| std::env::var("DATABASE_URL").ok())
                        .context("either --file or --db (or DATABASE_URL) is required")?;
                    let (first, second) = first
                        .zip(second)
                        .context("--first and --second are required with --db")?;
                    info!("Loading meals {} and {} from {}", first, second, url);
                    let store = SqliteMealStore::connect(&url)
                        .await
                        .with_context(|| format!("failed to open database: {}", url))?;
                    for id in [first, second] {
                        let meal = store
                            .load_combatant(CombatantId(id))
                            .await?
                            .with_context(|| format!("meal {} not found", id))?;
                        session.stage(meal).await?;
                    }
                    Arc::new(store)
                }
            };

            let outcome = BattleResolver::new(randomness, stats)
                .resolve(&session)
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}

fn load_combatants(path: &Path) -> Result<Vec<Combatant>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read combatants JSON: {}", path.display()))?;
    let data = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse combatants JSON: {}", path.display()))?;
    Ok(data)
}
