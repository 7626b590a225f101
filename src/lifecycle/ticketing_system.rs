use crate::clients::{LedgerClient, UserClient};
use crate::config::SystemConfig;
use crate::coordinator::{BookingError, ReservationCoordinator};
use crate::inventory::{EventInventory, InventoryError};
use crate::ledger::LedgerError;
use crate::model::{BookingId, EventCreate, EventId, UserCreate, UserId};
use crate::payment::{PaymentGateway, SimulatedGateway};
use crate::query::{BookingView, EventSummary, QueryService};
use crate::user_actor::UserError;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The whole ticketing system wired together.
///
/// `TicketingSystem` owns:
/// - the shared [`EventInventory`],
/// - the user and ledger actors, each on its own Tokio task,
/// - a [`ReservationCoordinator`] and a [`QueryService`] over them.
///
/// Must be created inside a Tokio runtime.
///
/// # Example
///
/// ```ignore
/// let system = TicketingSystem::new(SystemConfig::default());
///
/// let alice = system.register_user(UserCreate::new("alice", "alice@example.com")).await?;
/// let concert = system.create_event(EventCreate::new("Concert A", date, 100, price))?;
/// let booking = system.book_tickets(alice, concert, 2).await?;
///
/// system.shutdown().await?;
/// ```
pub struct TicketingSystem {
    inventory: Arc<EventInventory>,
    user_client: UserClient,
    ledger_client: LedgerClient,
    coordinator: ReservationCoordinator,
    query: QueryService,
    handles: Vec<JoinHandle<()>>,
}

impl TicketingSystem {
    /// Starts the system with a gateway that approves every charge.
    pub fn new(config: SystemConfig) -> Self {
        Self::with_gateway(config, Arc::new(SimulatedGateway::approving()))
    }

    pub fn with_gateway(config: SystemConfig, gateway: Arc<dyn PaymentGateway>) -> Self {
        let (user_actor, user_client) = crate::user_actor::new(config.mailbox_capacity);
        let (ledger_actor, ledger_client) = crate::ledger::new(config.mailbox_capacity);

        let user_handle = tokio::spawn(user_actor.run());
        let ledger_handle = tokio::spawn(ledger_actor.run());

        let inventory = Arc::new(EventInventory::new());
        let coordinator = ReservationCoordinator::new(
            inventory.clone(),
            Arc::new(user_client.clone()),
            ledger_client.clone(),
            gateway,
            config.payment_timeout(),
        );
        let query = QueryService::new(inventory.clone(), ledger_client.clone());

        info!(?config, "Ticketing system started");
        Self {
            inventory,
            user_client,
            ledger_client,
            coordinator,
            query,
            handles: vec![user_handle, ledger_handle],
        }
    }

    pub fn create_event(&self, params: EventCreate) -> Result<EventId, InventoryError> {
        self.inventory.create(params)
    }

    pub async fn register_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        self.user_client.register_user(params).await
    }

    pub async fn book_tickets(
        &self,
        user_id: UserId,
        event_id: EventId,
        num_tickets: u32,
    ) -> Result<BookingId, BookingError> {
        self.coordinator
            .book_tickets(user_id, event_id, num_tickets)
            .await
    }

    pub fn list_events(&self) -> Vec<EventSummary> {
        self.query.list_events()
    }

    pub async fn user_bookings(&self, user_id: UserId) -> Result<Vec<BookingView>, LedgerError> {
        self.query.user_bookings(user_id).await
    }

    pub fn inventory(&self) -> &Arc<EventInventory> {
        &self.inventory
    }

    pub fn users(&self) -> &UserClient {
        &self.user_client
    }

    pub fn ledger(&self) -> &LedgerClient {
        &self.ledger_client
    }

    /// A handle for booking from other tasks.
    pub fn coordinator(&self) -> ReservationCoordinator {
        self.coordinator.clone()
    }

    pub fn query(&self) -> QueryService {
        self.query.clone()
    }

    /// Stops the actors and waits for them to drain.
    ///
    /// Actors exit once every client clone is gone, so coordinators or query services handed
    /// out earlier must be dropped first or this never returns.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down ticketing system");
        let Self {
            inventory,
            user_client,
            ledger_client,
            coordinator,
            query,
            handles,
        } = self;
        drop((user_client, ledger_client, coordinator, query));

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!(events = inventory.len(), "Shutdown complete");
        Ok(())
    }
}
