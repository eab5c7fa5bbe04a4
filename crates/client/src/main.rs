//! Headless combat simulator binary.
//!
//! Composition root that assembles content, the knowledge store and the
//! runtime, runs one encounter with the scripted player and prints the end
//! payload as JSON on stdout.
//!
//! # Examples
//!
//! ```bash
//! COMBAT_OPPONENTS=goblin,wolf COMBAT_SEED=7 cargo run -p combat-client
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use combat_client::{ClientConfig, ScriptedPlayer, logging};
use combat_content::ContentFactory;
use runtime::{
    Event, FileKnowledgeStore, InMemoryKnowledgeStore, KnowledgeStore, Runtime, RuntimeConfig,
    Topic,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let client_config = ClientConfig::from_env();
    let runtime_config = RuntimeConfig::from_env();

    // 2. Setup logging
    let _guard = logging::setup_logging(&client_config.session_id)?;
    tracing::info!("Starting combat simulator");
    tracing::info!("Content: {}", client_config.content_dir.display());

    // 3. Load content
    let content = ContentFactory::new(&client_config.content_dir)
        .load_all()
        .context("failed to load combat content")?;

    // 4. Knowledge store: persistent per session, otherwise in memory
    let store: Arc<dyn KnowledgeStore> = match client_config.save_dir() {
        Some(dir) => {
            tracing::info!("Save directory: {}", dir.display());
            Arc::new(FileKnowledgeStore::seeded(&dir, &content.loadout)?)
        }
        None => Arc::new(InMemoryKnowledgeStore::with_loadout(content.loadout.clone())),
    };

    // 5. Build runtime
    let mut runtime = Runtime::builder()
        .config(runtime_config.with_tables(content.tables))
        .roster(content.roster)
        .store(store)
        .player_provider(ScriptedPlayer::default())
        .build()?;

    let mut log = runtime.subscribe(Topic::Log);
    let log_task = tokio::spawn(async move {
        while let Ok(event) = log.recv().await {
            if let Event::Log(event) = event {
                tracing::info!(target: "combat::log", "{}", event.entry.message);
            }
        }
    });

    // 6. Run one encounter
    let payload = runtime.run_encounter(client_config.opponents.clone()).await?;
    println!("{}", serde_json::to_string_pretty(&payload)?);

    runtime.shutdown().await?;
    log_task.abort();

    tracing::info!("Simulator shutdown complete");
    Ok(())
}
