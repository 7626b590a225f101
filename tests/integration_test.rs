use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use ticket_reservation::clients::UserDirectory;
use ticket_reservation::config::SystemConfig;
use ticket_reservation::coordinator::BookingError;
use ticket_reservation::framework::ActorClient;
use ticket_reservation::inventory::InventoryError;
use ticket_reservation::lifecycle::{setup_tracing, TicketingSystem};
use ticket_reservation::model::{EventCreate, EventId, UserCreate, UserId};
use ticket_reservation::payment::{ChargeRequest, PaymentGateway, PaymentOutcome, SimulatedGateway};

/// Approves every other charge, after a short pause so charges overlap.
#[derive(Default)]
struct AlternatingGateway {
    calls: AtomicUsize,
}

#[async_trait]
impl PaymentGateway for AlternatingGateway {
    async fn charge(&self, _request: &ChargeRequest) -> PaymentOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(2)).await;
        if call % 2 == 0 {
            PaymentOutcome::Approved
        } else {
            PaymentOutcome::Declined {
                reason: "card declined".into(),
            }
        }
    }
}

fn concert_a() -> EventCreate {
    EventCreate::new(
        "Concert A",
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        100,
        Decimal::new(5000, 2),
    )
}

async fn alice(system: &TicketingSystem) -> UserId {
    system
        .register_user(UserCreate::new("Alice", "alice@example.com"))
        .await
        .expect("Failed to register user")
}

fn available(system: &TicketingSystem, event_id: EventId) -> u32 {
    system
        .inventory()
        .snapshot(event_id)
        .expect("event exists")
        .available_tickets
}

/// Sum of booked tickets plus remaining tickets must equal the pool, per event.
async fn assert_conservation(system: &TicketingSystem) {
    let all = system.ledger().all_bookings().await.unwrap();
    let mut booked: HashMap<EventId, u32> = HashMap::new();
    for booking in &all {
        *booked.entry(booking.event_id).or_default() += booking.num_tickets;
    }
    for event in system.list_events() {
        assert!(event.available_tickets <= event.total_tickets);
        assert_eq!(
            booked.get(&event.id).copied().unwrap_or(0) + event.available_tickets,
            event.total_tickets,
            "tickets leaked for {}",
            event.name
        );
    }
}

/// End-to-end run with every real component.
#[tokio::test]
async fn test_full_booking_flow() {
    setup_tracing();
    let system = TicketingSystem::new(SystemConfig::default());

    let user_id = alice(&system).await;
    let user = system.users().get(user_id).await.unwrap().expect("User not found");
    assert_eq!(user.username, "Alice");
    assert!(system.users().exists(user_id).await.unwrap());

    // Scenario A
    let concert = system.create_event(concert_a()).unwrap();
    let booking_id = system.book_tickets(user_id, concert, 2).await.unwrap();
    assert_eq!(available(&system, concert), 98);

    let booking = system.ledger().get(booking_id).await.unwrap().unwrap();
    assert_eq!(booking.user_id, user_id);
    assert_eq!(booking.num_tickets, 2);
    assert_eq!(booking.total_price, Decimal::new(10000, 2));

    // Scenario B
    let err = system.book_tickets(user_id, concert, 99).await.unwrap_err();
    assert_eq!(
        err,
        BookingError::Inventory(InventoryError::InsufficientInventory {
            event_id: concert,
            requested: 99,
            available: 98
        })
    );
    assert_eq!(available(&system, concert), 98);

    // the exact remainder still books
    system.book_tickets(user_id, concert, 98).await.unwrap();
    assert_eq!(available(&system, concert), 0);

    let views = system.user_bookings(user_id).await.unwrap();
    let counts: Vec<_> = views.iter().map(|v| v.num_tickets).collect();
    assert_eq!(counts, [2, 98]);
    assert!(views
        .iter()
        .all(|v| v.event_name.as_deref() == Some("Concert A")));

    assert_conservation(&system).await;
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_event_mutates_nothing() {
    let system = TicketingSystem::new(SystemConfig::default());
    let user_id = alice(&system).await;
    let concert = system.create_event(concert_a()).unwrap();

    // Scenario C
    let missing = EventId::new();
    let err = system.book_tickets(user_id, missing, 1).await.unwrap_err();
    assert_eq!(err, BookingError::Inventory(InventoryError::NotFound(missing)));
    assert_eq!(available(&system, concert), 100);
    assert!(system.user_bookings(user_id).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_requests() {
    let system = TicketingSystem::new(SystemConfig::default());
    let user_id = alice(&system).await;
    let concert = system.create_event(concert_a()).unwrap();

    // Scenario D
    assert!(matches!(
        system.book_tickets(user_id, concert, 0).await,
        Err(BookingError::InvalidArgument(_))
    ));

    let stranger = UserId::new();
    assert_eq!(
        system.book_tickets(stranger, concert, 1).await.unwrap_err(),
        BookingError::UnknownUser(stranger)
    );

    let mut empty_pool = concert_a();
    empty_pool.total_tickets = 0;
    assert!(matches!(
        system.create_event(empty_pool),
        Err(InventoryError::InvalidArgument(_))
    ));
    assert_eq!(available(&system, concert), 100);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_user_without_bookings_has_empty_history() {
    let system = TicketingSystem::new(SystemConfig::default());
    let user_id = alice(&system).await;

    // Scenario E
    assert!(system.user_bookings(user_id).await.unwrap().is_empty());
    assert!(system.user_bookings(UserId::new()).await.unwrap().is_empty());
    assert!(system.list_events().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_declined_payment_rolls_back() {
    let system = TicketingSystem::with_gateway(
        SystemConfig::default(),
        Arc::new(SimulatedGateway::declining("card expired")),
    );
    let user_id = alice(&system).await;
    let concert = system.create_event(concert_a()).unwrap();

    let err = system.book_tickets(user_id, concert, 4).await.unwrap_err();
    assert_eq!(
        err,
        BookingError::PaymentDeclined {
            reason: "card expired".into()
        }
    );
    assert_eq!(available(&system, concert), 100);
    assert!(system.user_bookings(user_id).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_slow_gateway_times_out_and_rolls_back() {
    let config = SystemConfig {
        payment_timeout_ms: 50,
        ..SystemConfig::default()
    };
    let gateway = SimulatedGateway::approving().with_latency(Duration::from_secs(2));
    let system = TicketingSystem::with_gateway(config, Arc::new(gateway));
    let user_id = alice(&system).await;
    let concert = system.create_event(concert_a()).unwrap();

    let err = system.book_tickets(user_id, concert, 1).await.unwrap_err();
    assert!(matches!(err, BookingError::PaymentFailed { .. }));
    assert_eq!(available(&system, concert), 100);

    system.shutdown().await.unwrap();
}

/// N single-ticket bookings against a pool of T: exactly min(N, T) succeed.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_never_oversell() {
    const TOTAL: u32 = 40;
    const CALLERS: usize = 150;

    let system = TicketingSystem::new(SystemConfig::default());
    let user_id = alice(&system).await;
    let mut params = concert_a();
    params.total_tickets = TOTAL;
    let concert = system.create_event(params).unwrap();

    let tasks: Vec<_> = (0..CALLERS)
        .map(|_| {
            let coordinator = system.coordinator();
            tokio::spawn(async move { coordinator.book_tickets(user_id, concert, 1).await })
        })
        .collect();

    let mut granted = 0;
    let mut refused = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => granted += 1,
            Err(BookingError::Inventory(InventoryError::InsufficientInventory { .. })) => {
                refused += 1
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(granted, TOTAL as usize);
    assert_eq!(refused, CALLERS - TOTAL as usize);
    assert_eq!(available(&system, concert), 0);
    assert_eq!(
        system.user_bookings(user_id).await.unwrap().len(),
        TOTAL as usize
    );
    assert_conservation(&system).await;

    system.shutdown().await.unwrap();
}

/// Bookings spread over several events with mixed sizes keep every pool consistent.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_across_events() {
    let system = TicketingSystem::new(SystemConfig::default());
    let date = NaiveDate::from_ymd_opt(2026, 3, 22).unwrap();
    let events: Vec<EventId> = (0..4)
        .map(|i| {
            system
                .create_event(EventCreate::new(
                    format!("Match {i}"),
                    date,
                    25,
                    Decimal::new(7500, 2),
                ))
                .unwrap()
        })
        .collect();

    let mut users = Vec::new();
    for i in 0..8 {
        users.push(
            system
                .register_user(UserCreate::new(format!("fan{i}"), format!("fan{i}@example.com")))
                .await
                .unwrap(),
        );
    }

    let mut tasks = Vec::new();
    for (n, user_id) in users.iter().copied().enumerate() {
        for (m, event_id) in events.iter().copied().enumerate() {
            let coordinator = system.coordinator();
            let count = ((n + m) % 4 + 1) as u32;
            tasks.push(tokio::spawn(async move {
                coordinator.book_tickets(user_id, event_id, count).await
            }));
        }
    }
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) | Err(BookingError::Inventory(InventoryError::InsufficientInventory { .. })) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_conservation(&system).await;
    system.shutdown().await.unwrap();
}

/// A caller that gives up while payment is still pending must not strand its tickets.
#[tokio::test]
async fn test_abandoned_booking_returns_tickets() {
    let config = SystemConfig {
        payment_timeout_ms: 10_000,
        ..SystemConfig::default()
    };
    let gateway = SimulatedGateway::approving().with_latency(Duration::from_secs(5));
    let system = TicketingSystem::with_gateway(config, Arc::new(gateway));
    let user_id = alice(&system).await;
    let concert = system.create_event(concert_a()).unwrap();

    let attempt = tokio::time::timeout(
        Duration::from_millis(50),
        system.book_tickets(user_id, concert, 5),
    )
    .await;
    assert!(attempt.is_err(), "booking should still be waiting on payment");

    assert_eq!(available(&system, concert), 100);
    assert!(system.user_bookings(user_id).await.unwrap().is_empty());
    assert_conservation(&system).await;

    system.shutdown().await.unwrap();
}

/// Declines racing approvals on one pool leave every declined ticket back in the pool.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_declines_and_approvals_stay_consistent() {
    const TOTAL: u32 = 60;
    const CALLERS: usize = 120;

    let system =
        TicketingSystem::with_gateway(SystemConfig::default(), Arc::new(AlternatingGateway::default()));
    let user_id = alice(&system).await;
    let mut params = concert_a();
    params.total_tickets = TOTAL;
    let concert = system.create_event(params).unwrap();

    let tasks: Vec<_> = (0..CALLERS)
        .map(|_| {
            let coordinator = system.coordinator();
            tokio::spawn(async move { coordinator.book_tickets(user_id, concert, 1).await })
        })
        .collect();

    let mut successes = 0u32;
    let mut declined = 0u32;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => successes += 1,
            Err(BookingError::PaymentDeclined { .. }) => declined += 1,
            Err(BookingError::Inventory(InventoryError::InsufficientInventory { .. })) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert!(successes > 0);
    assert!(declined > 0);
    assert_eq!(successes, TOTAL - available(&system, concert));
    assert_eq!(
        system.user_bookings(user_id).await.unwrap().len(),
        successes as usize
    );
    assert_conservation(&system).await;

    system.shutdown().await.unwrap();
}
