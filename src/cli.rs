//! Command-line surface
//!
//! `serve` runs the HTTP server; `newuser` and `passwd` manage identities
//! directly on the data root without going through HTTP.

use clap::{Parser, Subcommand};
use log::info;

use crate::config::StoreConfig;
use crate::error::{IdentityError, ServerError};
use crate::identity::{IdentityHandle, IdentityStore};
use crate::server::Server;

#[derive(Debug, Parser)]
#[command(name = "rax-image-server", version, about = "Per-user image storage server")]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Create a user with an initial password
    Newuser {
        #[arg(long)]
        username: String,

        #[arg(long, env = "RAX_IMAGES_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Replace an existing user's password
    Passwd {
        #[arg(long)]
        username: String,

        #[arg(long, env = "RAX_IMAGES_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

impl Command {
    /// Subcommand name, safe to log
    pub fn name(&self) -> &'static str {
        match self {
            Command::Serve => "serve",
            Command::Newuser { .. } => "newuser",
            Command::Passwd { .. } => "passwd",
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<(), ServerError> {
        let config = StoreConfig::load(self.config.as_deref())?;

        match self.command {
            Command::Serve => Server::new(config).await?.start().await,
            Command::Newuser { username, password } => {
                let store = IdentityStore::new(&config);
                let handle = create_user(&store, &username, password.as_deref())?;
                info!("User {} created at {}", handle.name(), handle.root().display());
                println!("User created successfully.");
                Ok(())
            }
            Command::Passwd { username, password } => {
                let store = IdentityStore::new(&config);
                change_password(&store, &username, password.as_deref())?;
                println!("Password changed successfully.");
                Ok(())
            }
        }
    }
}

fn reject_blank(password: Option<&str>) -> Result<&str, IdentityError> {
    match password {
        None => Err(IdentityError::InvalidInput("a password is required".into())),
        Some(p) if p.trim().is_empty() => {
            Err(IdentityError::InvalidInput("blank passwords aren't allowed".into()))
        }
        Some(p) => Ok(p),
    }
}

/// Provision a user, refusing blank passwords.
pub fn create_user(
    store: &IdentityStore,
    username: &str,
    password: Option<&str>,
) -> Result<IdentityHandle, IdentityError> {
    let password = reject_blank(password)?;
    store.provision(username, Some(password))
}

/// Rotate a user's password, refusing blank passwords.
pub fn change_password(
    store: &IdentityStore,
    username: &str,
    password: Option<&str>,
) -> Result<(), IdentityError> {
    let password = reject_blank(password)?;
    store.rotate_password(username, password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_newuser() {
        let cli = Cli::try_parse_from([
            "rax-image-server",
            "--config",
            "/etc/rax/images.toml",
            "newuser",
            "--username",
            "alice",
            "--password",
            "alice123",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("/etc/rax/images.toml"));
        match cli.command {
            Command::Newuser { username, password } => {
                assert_eq!(username, "alice");
                assert_eq!(password.as_deref(), Some("alice123"));
            }
            other => panic!("unexpected command {}", other.name()),
        }
    }

    #[test]
    fn create_user_refuses_blank_password() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::with_root(dir.path());
        assert!(matches!(
            create_user(&store, "alice", Some("   ")),
            Err(IdentityError::InvalidInput(_))
        ));
        assert!(matches!(
            create_user(&store, "alice", None),
            Err(IdentityError::InvalidInput(_))
        ));
        assert!(!store.exists("alice"));
    }

    #[test]
    fn create_then_change_password() {
        let dir = TempDir::new().unwrap();
        let store = IdentityStore::with_root(dir.path());
        create_user(&store, "alice", Some("old")).unwrap();
        assert!(matches!(
            create_user(&store, "alice", Some("again")),
            Err(IdentityError::AlreadyExists(_))
        ));

        change_password(&store, "alice", Some("new")).unwrap();
        assert!(store.verify("alice", "new").is_authenticated());
        assert!(matches!(
            change_password(&store, "bob", Some("pw")),
            Err(IdentityError::NotFound(_))
        ));
    }
}
