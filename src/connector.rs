//! Long-lived Redis connection owned by the process.

use std::fmt;
use std::sync::Arc;

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::config::Config;
use crate::error::ConnectorError;

/// Observable lifecycle of the Redis connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Initial attempt still in flight.
    Connecting,
    /// Connection established and handed to the manager.
    Connected,
    /// Initial attempt failed; the process keeps running without Redis.
    Error,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

struct Inner {
    host: String,
    port: u16,
    status: RwLock<ConnectionStatus>,
    manager: RwLock<Option<ConnectionManager>>,
}

/// Handle to the process-wide Redis connection.
///
/// Cloning is cheap; all clones observe the same status and share the
/// underlying [`ConnectionManager`] once it is established. Components that
/// need Redis (queue producers, workers) take a clone of this handle instead
/// of reaching for global state.
#[derive(Clone)]
pub struct RedisConnector {
    inner: Arc<Inner>,
}

impl RedisConnector {
    /// Create a handle without starting a connection attempt.
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                host: config.redis_host.clone(),
                port: config.redis_port,
                status: RwLock::new(ConnectionStatus::Connecting),
                manager: RwLock::new(None),
            }),
        }
    }

    /// Create a handle and start the connection attempt in the background.
    ///
    /// Failures are logged and reflected in [`RedisConnector::status`],
    /// never returned: the service keeps running without Redis.
    pub fn connect(config: &Config) -> Self {
        let connector = Self::new(config);
        let config = config.clone();
        let inner = Arc::clone(&connector.inner);

        tokio::spawn(async move {
            match Self::establish(&config).await {
                Ok(manager) => {
                    info!("Connected to Redis");
                    info!("Redis host: {}:{}", inner.host, inner.port);

                    *inner.manager.write().await = Some(manager);
                    *inner.status.write().await = ConnectionStatus::Connected;
                }
                Err(err) => {
                    match &err {
                        ConnectorError::AuthRequired(source) => {
                            error!("Redis auth error: {}", source);
                            error!(
                                "The Redis server requires a password. \
                                 Set REDIS_PASSWORD in the environment or .env file."
                            );
                        }
                        ConnectorError::Connection(source) => {
                            error!("Redis connection error: {}", source);
                        }
                    }

                    *inner.status.write().await = ConnectionStatus::Error;
                }
            }
        });

        connector
    }

    /// Perform one foreground connection attempt.
    ///
    /// Probes with `PING` before handing the client to the manager, so a
    /// misconfigured host or a missing password surfaces here once instead
    /// of disappearing into the manager's retry loop.
    pub async fn establish(config: &Config) -> Result<ConnectionManager, ConnectorError> {
        let client =
            redis::Client::open(connection_info(config)).map_err(ConnectorError::from_redis)?;

        let mut probe = client
            .get_multiplexed_async_connection()
            .await
            .map_err(ConnectorError::from_redis)?;
        let _: String = redis::cmd("PING")
            .query_async(&mut probe)
            .await
            .map_err(ConnectorError::from_redis)?;

        // Queue consumers dispatch against this handle and expect commands
        // to be retried until the connection comes back, not to fail after
        // a fixed number of attempts.
        let manager_config = ConnectionManagerConfig::new().set_number_of_retries(usize::MAX);

        ConnectionManager::new_with_config(client, manager_config)
            .await
            .map_err(ConnectorError::from_redis)
    }

    /// Current status of the connection.
    pub async fn status(&self) -> ConnectionStatus {
        *self.inner.status.read().await
    }

    /// The connection handle, once established.
    pub async fn connection(&self) -> Option<ConnectionManager> {
        self.inner.manager.read().await.clone()
    }

    /// Configured Redis address, for diagnostics and logs.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.inner.host, self.inner.port)
    }
}

/// Build the structured connection parameters from config.
///
/// A structured [`ConnectionInfo`] avoids assembling a `redis://` URL by
/// hand, which would require percent-encoding the password.
fn connection_info(config: &Config) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(config.redis_host.clone(), config.redis_port),
        redis: RedisConnectionInfo {
            password: config.redis_password.clone(),
            ..Default::default()
        },
    }
}
