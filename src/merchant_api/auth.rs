use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenData {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

/// Body of a successful `POST /login`, also the on-disk cache format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthData {
    pub merchant_id: String,
    pub token: TokenData,
}

/// Bearer credential handed to the API client. The token is only
/// readable while it has not expired.
#[derive(Debug, Clone)]
pub struct Credential {
    data: AuthData,
}

impl Credential {
    pub fn new(data: AuthData) -> Self {
        Self { data }
    }

    pub fn token(&self) -> Option<&str> {
        self.token_at(Utc::now())
    }

    pub fn token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        (self.data.token.expiry > now).then_some(self.data.token.token.as_str())
    }

    pub fn is_expired(&self) -> bool {
        self.token().is_none()
    }

    pub fn merchant_id(&self) -> &str {
        &self.data.merchant_id
    }

    pub fn expiry(&self) -> DateTime<Utc> {
        self.data.token.expiry
    }

    /// Loads a cached credential. Missing, unreadable or expired caches are
    /// treated as "not logged in" and removed.
    pub async fn read_cached(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.ok()?;

        match serde_json::from_str::<AuthData>(&contents) {
            Ok(data) => {
                let credential = Self::new(data);
                if credential.is_expired() {
                    tracing::info!("Cached credential expired at {}", credential.expiry());
                    Self::clear(path).await;
                    None
                } else {
                    Some(credential)
                }
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable credential cache: {e}");
                Self::clear(path).await;
                None
            }
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> eyre::Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, serde_json::to_vec_pretty(&self.data)?).await?;
        Ok(())
    }

    pub async fn clear(path: impl AsRef<Path>) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove credential cache: {e}");
            }
        }
    }
}
