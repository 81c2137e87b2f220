use crate::address_actor;
use crate::auth::{PasswordHasher, TokenService};
use crate::clients::{AddressClient, OrderClient, ProductClient, UserClient};
use crate::config::Config;
use crate::error::AppError;
use crate::order_actor;
use crate::product_actor;
use crate::services::{OrderService, ProductService, UserService};
use crate::user_actor;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The order workflow wired to the production stores.
pub type StoreOrderService = OrderService<ProductClient, OrderClient, AddressClient>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// Starts, wires and stops every actor in the storefront.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: spawning the four resource actors and awaiting them on shutdown
/// - **Dependency Wiring**: the Order actor gets a `UserClient` as its context; the services
///   get the clients they are written against
///
/// # Architecture
///
/// ```text
/// UserService ----> User actor <------------+
/// ProductService -> Product actor <--+      | (context: owner check)
/// OrderService ---> Product actor ---+      |
///              ---> Address actor           |
///              ---> Order actor ------------+
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use storefront::config::Config;
/// use storefront::lifecycle::OrderSystem;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::from_env()?;
/// let system = OrderSystem::new(&config)?;
/// // ... use system.order_service, system.user_service, ...
/// system.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct OrderSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub address_client: AddressClient,
    pub order_client: OrderClient,

    pub user_service: UserService,
    pub product_service: ProductService<ProductClient>,
    pub order_service: StoreOrderService,

    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns every actor on the current Tokio runtime and builds the services.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let settings = config.actors;
        let hasher = PasswordHasher::new(config.password_hash_memory_kib)?;
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl);

        let (user_actor, user_client) = user_actor::new(settings);
        let user_handle = tokio::spawn(user_actor.run(()));

        let (product_actor, product_client) = product_actor::new(settings);
        let product_handle = tokio::spawn(product_actor.run(()));

        let (address_actor, address_client) = address_actor::new(settings);
        let address_handle = tokio::spawn(address_actor.run(()));

        // Owner validation on create
        let (order_actor, order_client) = order_actor::new(settings);
        let order_handle = tokio::spawn(order_actor.run(user_client.clone()));

        let user_service = UserService::new(user_client.clone(), hasher, tokens);
        let product_service = ProductService::new(product_client.clone(), config.default_page_size);
        let order_service = OrderService::new(
            product_client.clone(),
            order_client.clone(),
            address_client.clone(),
        );

        info!(buffer_size = settings.buffer_size, timeout = ?settings.timeout, "Storefront started");

        Ok(Self {
            user_client,
            product_client,
            address_client,
            order_client,
            user_service,
            product_service,
            order_service,
            handles: vec![order_handle, address_handle, product_handle, user_handle],
        })
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the actors' channels; each actor drains and exits,
    /// and the Order actor releases its `UserClient` on the way out. Any clone of a
    /// client or service handed out earlier must be dropped first, or this waits for it.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down storefront...");
        let OrderSystem {
            user_client,
            product_client,
            address_client,
            order_client,
            user_service,
            product_service,
            order_service,
            handles,
        } = self;
        drop((user_service, product_service, order_service));
        drop((user_client, product_client, address_client, order_client));

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
