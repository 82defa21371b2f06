//! Archon's Adventure, played from the terminal.
//!
//! By default the five reference backends start inside this process on
//! free local ports and the game talks to them over WebSocket. Set
//! `ARCHON_CONFIG` to a JSON config to use external services instead, or
//! `ARCHON_LOCAL=1` to skip sockets entirely. Saves go to `ARCHON_SAVE`
//! (default `save_file.json`).

use std::error::Error;

use archon_backend::{
    BattleService, EnemyService, MapService, RandomService, ServiceHandler,
    ServiceServerBuilder, WeatherService, local_channel,
};
use archon_game::item;
use archon_game::{
    BattleOutcome, DEFAULT_SAVE_FILE, Direction, FleeOutcome, GamePhase,
    GameSession, SaveStore,
};
use archon_protocol::ServiceKind;
use archon_services::{MoveOutcome, ServiceClients, ServiceConfig};
use archon_transport::{Channel, LocalChannel};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  n / s / e / w      walk north, south, east, or west
  look               describe where you stand
  inspect            look closer
  stats              show your stats
  inv                list your inventory
  take <item>        pick up a catalog item (Health Potion, Old Broadsword)
  use <item>         use a consumable
  drop <item>        drop an item
  attack / flee      fight or run
  save / load        write or restore the save file
  new                start over
  help / quit";

const GAME_OVER: &str = "\
What a pity... it would seem misfortune has befallen you.
Type `load` to turn back the clock, or `new` to begin anew.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let store = SaveStore::new(
        std::env::var("ARCHON_SAVE").unwrap_or_else(|_| DEFAULT_SAVE_FILE.to_string()),
    );
    let saved = store.read().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read save, starting fresh");
        None
    });

    if std::env::var("ARCHON_LOCAL").is_ok_and(|v| v == "1") {
        tracing::info!("running services in-process");
        let clients = ServiceClients::from_fn("archon", in_process);
        return play(GameSession::from_save(clients, saved.as_deref()), store).await;
    }

    let config = match std::env::var("ARCHON_CONFIG") {
        Ok(path) => {
            let raw = tokio::fs::read_to_string(&path).await?;
            ServiceConfig::from_json(&raw)?
        }
        Err(_) => spawn_backends().await?,
    };
    let clients = ServiceClients::connect(&config);
    play(GameSession::from_save(clients, saved.as_deref()), store).await
}

fn in_process(kind: ServiceKind) -> LocalChannel {
    match kind {
        ServiceKind::Movement => local_channel(MapService::test_map()),
        ServiceKind::Random => local_channel(RandomService::new()),
        ServiceKind::Enemy => local_channel(EnemyService::new()),
        ServiceKind::Battle => local_channel(BattleService),
        ServiceKind::Weather => local_channel(WeatherService::new()),
    }
}

/// Starts every reference backend on a free port and returns a config
/// pointing at them.
async fn spawn_backends() -> Result<ServiceConfig, Box<dyn Error>> {
    let mut config = ServiceConfig::default();
    let endpoints = &mut config.endpoints;
    endpoints.set(ServiceKind::Movement, serve(MapService::test_map()).await?);
    endpoints.set(ServiceKind::Random, serve(RandomService::new()).await?);
    endpoints.set(ServiceKind::Enemy, serve(EnemyService::new()).await?);
    endpoints.set(ServiceKind::Battle, serve(BattleService).await?);
    endpoints.set(ServiceKind::Weather, serve(WeatherService::new()).await?);
    Ok(config)
}

async fn serve<H: ServiceHandler>(handler: H) -> Result<String, Box<dyn Error>> {
    let server = ServiceServerBuilder::new().build(handler).await?;
    let url = server.url()?;
    tracing::info!(service = %H::KIND, %url, "backend started");
    tokio::spawn(async move {
        if let Err(e) = server.run().await {
            tracing::error!(service = %H::KIND, error = %e, "backend stopped");
        }
    });
    Ok(url)
}

// ---------------------------------------------------------------------------
// Command loop
// ---------------------------------------------------------------------------

async fn play<C: Channel>(
    mut session: GameSession<C>,
    store: SaveStore,
) -> Result<(), Box<dyn Error>> {
    println!("ARCHON'S ADVENTURE\n");
    session.refresh_tile().await;
    println!("{}\n\n{HELP}\n", session.narration());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(&session);
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "q" => break,
            "help" | "?" => println!("{HELP}"),
            "n" | "north" => walk(&mut session, Direction::North).await,
            "s" | "south" => walk(&mut session, Direction::South).await,
            "e" | "east" => walk(&mut session, Direction::East).await,
            "w" | "west" => walk(&mut session, Direction::West).await,
            "look" => println!("{}", session.narration()),
            "inspect" => println!("{}", session.inspection()),
            "stats" => println!("{}", session.stats_summary()),
            "inv" => {
                let names = session.inventory_names();
                if names.is_empty() {
                    println!("Your pack is empty.");
                } else {
                    for name in names {
                        let text = item::lookup(name).map_or("", |i| i.effect_text);
                        println!("- {name} ({text})");
                    }
                }
            }
            "take" => match item::lookup(arg) {
                Some(found) => report(session.add_item(found).map(|()| {
                    format!("You pick up the {}. {}", found.name, found.description)
                })),
                None => println!("There is no {arg:?} to take."),
            },
            "use" => report(session.use_item(arg).map(|()| format!("You use the {arg}."))),
            "drop" => report(
                session
                    .remove_item(arg)
                    .map(|dropped| format!("You drop the {}.", dropped.name)),
            ),
            "attack" => match session.attack().await {
                Ok(BattleOutcome::Victory) => {
                    println!("The {} falls. You are victorious.", session.enemy().name)
                }
                Ok(BattleOutcome::Defeat) => println!("{GAME_OVER}"),
                Ok(BattleOutcome::Ongoing) => println!(
                    "You trade blows. You: {} HP, {}: {} HP.",
                    session.player().stats.health,
                    session.enemy().name,
                    session.enemy().health
                ),
                Err(e) => println!("{e}"),
            },
            "flee" => match session.flee().await {
                Ok(FleeOutcome::Escaped) => println!("You got away."),
                Ok(FleeOutcome::Failed) => println!("You couldn't get away! Stand and fight."),
                Err(e) => println!("{e}"),
            },
            "save" => match store.write(&session.save()).await {
                Ok(()) => println!("Game saved."),
                Err(e) => println!("Could not save: {e}"),
            },
            "load" => {
                let raw = store.read().await.unwrap_or(None);
                if session.load(raw.as_deref()) {
                    session.refresh_tile().await;
                    println!("Save loaded.\n{}", session.narration());
                } else {
                    println!("There is no save to load.");
                }
            }
            "new" => {
                session.reset();
                session.refresh_tile().await;
                println!("A new journey begins.\n{}", session.narration());
            }
            other => println!("Unknown command {other:?}. Type `help`."),
        }
        prompt(&session);
    }
    Ok(())
}

async fn walk<C: Channel>(session: &mut GameSession<C>, direction: Direction) {
    match session.move_player(direction).await {
        Ok(MoveOutcome::Moved(_)) => {
            println!("{}", session.narration());
            match session.encounter_check().await {
                Ok(true) => println!(
                    "A {} appears! ({} HP) attack or flee?",
                    session.enemy().name,
                    session.enemy().health
                ),
                Ok(false) => {}
                Err(e) => println!("{e}"),
            }
        }
        Ok(_) => println!("{}", session.narration()),
        Err(e) => println!("{e}"),
    }
}

fn report(result: Result<String, archon_game::GameError>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(e) => println!("{e}"),
    }
}

fn prompt<C: Channel>(session: &GameSession<C>) {
    let marker = match session.phase() {
        GamePhase::Exploring => format!("[{}] >", session.weather()),
        GamePhase::InBattle => format!("[battle: {}] >", session.enemy().name),
        GamePhase::GameOver => "[game over] >".to_string(),
    };
    println!("{marker}");
}
