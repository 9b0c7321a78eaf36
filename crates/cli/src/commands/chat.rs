//! `hearth chat` — Interactive or single-message chat mode.

use std::sync::Arc;
use hearth_agent::Agent;
use hearth_config::AppConfig;
use hearth_memory::{MemoryManager, MemorySettings};
use tokio::io::BufReader;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Provider selection is resolved once here; a bad selection is
    // fatal before any session state exists.
    let model = hearth_providers::build_from_config(&config)?;

    let tools = Arc::new(hearth_tools::default_registry());

    let identity = config
        .identity
        .system_prompt_override
        .clone()
        .unwrap_or_else(|| hearth_agent::default_identity(&tools));

    let settings = MemorySettings {
        window_size: config.memory.short_memory_size,
        disable_short_memory: config.memory.disable_short_memory,
        disable_long_memory: config.memory.disable_long_memory,
        long_memory_budget: config.memory.long_memory_size,
    };
    let memory = MemoryManager::new(model.clone(), settings, config.temperature);

    let mut agent = Agent::new(model, tools, identity, memory)
        .with_temperature(config.temperature)
        .with_transcript_dir(&config.transcript_dir);

    if let Some(msg) = message {
        // Single message mode: one turn, no transcript.
        let answer = agent.process_turn(&msg).await;
        println!("{answer}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!(
        "  hearth — provider: {}",
        config.model_provider.as_deref().unwrap_or("?")
    );
    println!();

    let stdin = BufReader::new(tokio::io::stdin());
    if let Some(path) = agent.run_session(stdin).await? {
        println!("Transcript saved to {}", path.display());
    }

    Ok(())
}
