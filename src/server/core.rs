use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::auth::PasswordGate;
use crate::config::StoreConfig;
use crate::error::ServerError;
use crate::identity::IdentityStore;
use crate::server::extract::AppState;
use crate::server::router::build_router;

pub struct Server {
    state: AppState,
    listener: TcpListener,
}

impl Server {
    /// Prepare the data root and bind the listener.
    pub async fn new(config: StoreConfig) -> Result<Self, ServerError> {
        let data_root = config.data_root_path();
        if let Err(e) = std::fs::create_dir_all(&data_root) {
            error!("Failed to create data root {}: {}", data_root.display(), e);
            return Err(ServerError::IoError(e));
        }
        info!("Data root directory: {}", data_root.display());

        let socket = config.listen_socket();
        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(ServerError::IoError(e));
            }
        };

        let store = IdentityStore::new(&config);
        let state = AppState::new(config, Arc::new(PasswordGate::new(store)));
        Ok(Self { state, listener })
    }

    pub fn local_addr(&self) -> Result<std::net::SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve requests until the listener fails.
    pub async fn start(self) -> Result<(), ServerError> {
        info!(
            "Starting RAX image server on {} (extensions: {})",
            self.state.config.listen_socket(),
            self.state.config.allowed_extensions.join(", ")
        );

        let app = build_router(self.state);
        axum::serve(self.listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_data_root_and_binds() {
        let dir = TempDir::new().unwrap();
        let data_root = dir.path().join("files");
        let config = StoreConfig {
            data_root: data_root.to_string_lossy().into_owned(),
            port: 0,
            ..StoreConfig::default()
        };

        let server = Server::new(config).await.unwrap();
        assert!(data_root.is_dir());
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }
}
