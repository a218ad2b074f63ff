//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port with a one-hero seed, then drives
//! `HeroService` and `HeroDetail` over real HTTP through `UreqTransport`.
//! Validates request building, response parsing and the message log
//! end-to-end.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hero_core::in_memory::default_heroes;
use hero_core::{ClientConfig, Hero, HeroApp, History, NewHero};

fn start_server(heroes: Vec<mock_server::Hero>) -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, heroes).await
        })
        .unwrap();
    });

    addr
}

#[derive(Clone, Default)]
struct CountingHistory(Arc<AtomicUsize>);

impl History for CountingHistory {
    fn back(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn mr_nice() -> Hero {
    Hero {
        id: 1,
        name: "Mr. Nice".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn crud_lifecycle() {
    // Step 1: start mock server seeded with a single hero.
    let addr = start_server(vec![mock_server::Hero {
        id: 1,
        name: "Mr. Nice".to_string(),
    }]);
    let app = HeroApp::connect(&ClientConfig::with_base_url(format!("http://{addr}")));
    let service = app.service();
    let log = app.messages();

    // Step 2: list.
    assert_eq!(service.list_heroes().await, vec![mr_nice()]);
    assert_eq!(log.len(), 1);

    // Step 3: get known and unknown ids.
    assert_eq!(service.get_hero(1).await, Some(mr_nice()));
    assert_eq!(log.messages()[1], "HeroService: fetched hero id=1");
    assert_eq!(service.get_hero(99).await, None);
    assert_eq!(
        log.messages()[2],
        "HeroService: get_hero id=99 failed: resource not found"
    );

    // Step 4: search, including the blank short-circuit.
    assert_eq!(service.search_heroes("nice").await, vec![mr_nice()]);
    assert_eq!(
        log.messages()[3],
        r#"HeroService: found heroes matching "nice""#
    );
    assert!(service.search_heroes("   ").await.is_empty());
    assert_eq!(log.len(), 4);

    // Step 5: add, then fetch the created hero.
    let created = service.add_hero(&NewHero::new("Narco")).await.unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(service.get_hero(2).await.unwrap().name, "Narco");

    // Step 6: edit through the detail controller.
    let history = CountingHistory::default();
    let mut detail = app.detail(|_: &str| Some("2".to_string()), history.clone());
    detail.init().await;
    assert_eq!(detail.hero(), Some(&created));
    detail.set_name("Narcissus");
    detail.save().await;
    assert_eq!(history.0.load(Ordering::SeqCst), 1);
    assert_eq!(service.get_hero(2).await.unwrap().name, "Narcissus");

    // Step 7: delete by record, then by id.
    let renamed = Hero {
        id: 2,
        name: "Narcissus".to_string(),
    };
    assert_eq!(service.delete_hero(&renamed).await, Some(renamed));
    assert_eq!(service.get_hero(2).await, None);
    assert_eq!(service.delete_hero(2).await, None);

    // Step 8: every remote-backed call left exactly one entry.
    assert_eq!(log.len(), 12);
    assert_eq!(service.list_heroes().await, vec![mr_nice()]);
}

#[tokio::test]
async fn unreachable_server_degrades_to_fallbacks() {
    // Bind then drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let config = ClientConfig {
        base_url: format!("http://{addr}"),
        timeout_ms: 2_000,
        ..ClientConfig::default()
    };
    let app = HeroApp::connect(&config);
    let service = app.service();

    assert!(service.list_heroes().await.is_empty());
    assert_eq!(service.get_hero(1).await, None);

    let messages = app.messages().messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("HeroService: list_heroes failed: transport failed:"));
}

#[test]
fn in_memory_fixture_matches_server_seed() {
    let server: Vec<Hero> = mock_server::seed_heroes()
        .into_iter()
        .map(|h| Hero {
            id: h.id,
            name: h.name,
        })
        .collect();
    assert_eq!(default_heroes(), server);
}
