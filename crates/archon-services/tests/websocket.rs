//! Clients talking to the reference backends over real sockets.

use std::time::Duration;

use archon_backend::{
    BattleService, EnemyService, MapService, RandomService, ServiceHandler,
    ServiceServerBuilder, WeatherService,
};
use archon_protocol::{Coords, EnemyState, Roll, ServiceKind, Weather};
use archon_services::{MoveOutcome, ServiceClients, ServiceConfig};

async fn start<H: ServiceHandler>(handler: H) -> String {
    let server = ServiceServerBuilder::new()
        .build(handler)
        .await
        .expect("should bind");
    let url = server.url().expect("should have url");
    tokio::spawn(server.run());
    url
}

/// A config pointing every client at a freshly started backend.
async fn live_config() -> ServiceConfig {
    let mut config = ServiceConfig {
        send_timeout_ms: 2000,
        recv_timeout_ms: 2000,
        ..ServiceConfig::default()
    };
    let endpoints = &mut config.endpoints;
    endpoints.set(ServiceKind::Movement, start(MapService::test_map()).await);
    endpoints.set(ServiceKind::Random, start(RandomService::with_seed(1)).await);
    endpoints.set(ServiceKind::Enemy, start(EnemyService::with_seed(2)).await);
    endpoints.set(ServiceKind::Battle, start(BattleService).await);
    endpoints.set(ServiceKind::Weather, start(WeatherService::with_seed(3)).await);
    config
}

#[tokio::test]
async fn test_connected_clients_reach_every_backend() {
    let mut clients = ServiceClients::connect(&live_config().await);

    let outcome = clients
        .movement
        .request_move("test_map", Coords::new(1, 4))
        .await;
    assert!(outcome.is_moved());
    assert_eq!(outcome.tile().biome, "desert");

    let roll = clients.random.roll().await;
    assert!((1..=100).contains(&roll.value()));

    let enemy = clients.enemy.fetch("desert", &EnemyState::default()).await;
    assert_eq!(enemy.biome, "desert");

    let stats = archon_protocol::Stats {
        health: 100,
        mana: 0,
        attack: 10,
        defense: 10,
    };
    let (after, foe) = clients.battle.resolve(&stats, &enemy).await;
    assert!(foe.health < enemy.health);
    assert!(after.health <= stats.health);

    let weather = clients.weather.refresh(Weather::Clear).await;
    assert!(Weather::ALL.contains(&weather));
}

#[tokio::test]
async fn test_nothing_listening_falls_back() {
    // Bind then drop a listener so the port is almost certainly closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut config = ServiceConfig {
        send_timeout_ms: 300,
        recv_timeout_ms: 300,
        ..ServiceConfig::default()
    };
    for kind in ServiceKind::ALL {
        config.endpoints.set(kind, format!("ws://{addr}"));
    }
    let mut clients = ServiceClients::connect(&config);

    assert!(matches!(
        clients.movement.request_move("test_map", Coords::new(2, 2)).await,
        MoveOutcome::Unreachable(_)
    ));
    assert_eq!(clients.random.roll().await, Roll::NEUTRAL);
    assert_eq!(clients.weather.refresh(Weather::Rain).await, Weather::Rain);
}

#[tokio::test]
async fn test_client_recovers_when_backend_appears() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = ServiceConfig {
        send_timeout_ms: 500,
        recv_timeout_ms: 500,
        ..ServiceConfig::default()
    };
    config.endpoints.set(ServiceKind::Random, format!("ws://{addr}"));
    let mut clients = ServiceClients::connect(&config);
    assert_eq!(clients.random.roll().await, Roll::NEUTRAL);

    let server = ServiceServerBuilder::new()
        .bind(&addr.to_string())
        .build(RandomService::with_seed(5))
        .await
        .expect("port should be free again");
    tokio::spawn(server.run());
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Rolls are random, so look for any non-neutral value over a few tries.
    let mut saw_live_roll = false;
    for _ in 0..10 {
        if clients.random.roll().await != Roll::NEUTRAL {
            saw_live_roll = true;
            break;
        }
    }
    assert!(saw_live_roll);
}
