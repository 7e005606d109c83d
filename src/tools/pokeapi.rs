//! HTTP client for the creature catalog.
//!
//! Entries are fetched one id at a time from `<base_url>/<id>` and converted
//! into battle-ready combatants.

use crate::core::factory::{create_combatant, draw_team_ids};
use crate::core::state::Combatant;
use crate::data::catalog::CatalogEntry;
use crate::error::{Error, Result};
use reqwest::StatusCode;
use tokio::task::JoinSet;

pub const DEFAULT_CATALOG_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Catalog API client
#[derive(Clone)]
pub struct PokeApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn entry_url(&self, id: u32) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), id)
    }

    pub async fn fetch_entry(&self, id: u32) -> Result<CatalogEntry> {
        let url = self.entry_url(id);
        tracing::info!(id, %url, "fetching catalog entry");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::EntryNotFound(id));
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::CatalogUnavailable(format!(
                "request for id {} failed with status {}: {}",
                id, status, body
            )));
        }

        let entry: CatalogEntry = serde_json::from_str(&body)?;
        Ok(entry)
    }

    pub async fn fetch_combatant(&self, id: u32) -> Result<Combatant> {
        let entry = self.fetch_entry(id).await?;
        Ok(create_combatant(&entry))
    }

    /// Combatants for `ids`, in the same order. All ids are requested at once;
    /// the first failure aborts the remaining requests.
    pub async fn fetch_roster(&self, ids: &[u32]) -> Result<Vec<Combatant>> {
        let mut requests = JoinSet::new();
        for (slot, &id) in ids.iter().enumerate() {
            let client = self.clone();
            requests.spawn(async move { (slot, client.fetch_combatant(id).await) });
        }

        let mut slots: Vec<Option<Combatant>> = vec![None; ids.len()];
        while let Some(joined) = requests.join_next().await {
            let (slot, combatant) = joined?;
            slots[slot] = Some(combatant?);
        }
        slots
            .into_iter()
            .zip(ids)
            .map(|(combatant, &id)| combatant.ok_or(Error::EntryNotFound(id)))
            .collect()
    }

    /// A random team drawn from `1..=max_id`.
    pub async fn fetch_team(
        &self,
        rng: &mut dyn FnMut() -> f64,
        team_size: usize,
        max_id: u32,
    ) -> Result<Vec<Combatant>> {
        let ids = draw_team_ids(rng, team_size, max_id);
        tracing::debug!(?ids, "drew opponent team");
        self.fetch_roster(&ids).await
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_url_joins_base_and_id() {
        let client = PokeApiClient::new("https://example.test/api/");
        assert_eq!(client.entry_url(25), "https://example.test/api/25");
        assert_eq!(PokeApiClient::default().entry_url(1), "https://pokeapi.co/api/v2/pokemon/1");
    }

    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `{"id": n, "name": "mon-n"}` for every `/n`, answering lower ids
    /// later, and 404 for ids of 900 and above.
    async fn catalog_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 2048];
                    let mut read = 0;
                    while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                    }
                    let request = String::from_utf8_lossy(&buf[..read]);
                    let id: u32 = request
                        .split_whitespace()
                        .nth(1)
                        .and_then(|path| path.rsplit('/').next())
                        .and_then(|id| id.parse().ok())
                        .unwrap_or(0);

                    let (status, body) = if id >= 900 {
                        ("404 Not Found", "{}".to_string())
                    } else {
                        tokio::time::sleep(Duration::from_millis(40u64.saturating_sub(id as u64 * 10))).await;
                        ("200 OK", format!(r#"{{"id":{},"name":"mon-{}"}}"#, id, id))
                    };
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{}", addr)
    }

    fn local_client(base_url: String) -> PokeApiClient {
        let client = reqwest::Client::builder().no_proxy().build().expect("client");
        PokeApiClient::with_client(base_url, client)
    }

    #[tokio::test]
    async fn roster_keeps_slot_order_when_responses_arrive_out_of_order() {
        let client = local_client(catalog_server().await);
        let roster = client.fetch_roster(&[1, 4, 2, 4]).await.expect("roster");
        let names: Vec<&str> = roster.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["mon-1", "mon-4", "mon-2", "mon-4"]);
        assert_eq!(roster[0].max_hp, 100);
    }

    #[tokio::test]
    async fn missing_entry_fails_the_roster() {
        let client = local_client(catalog_server().await);
        let err = client.fetch_roster(&[1, 901]).await.expect_err("404 in roster");
        assert!(matches!(err, Error::EntryNotFound(901)), "{}", err);
        assert!(client.fetch_roster(&[]).await.expect("empty").is_empty());
    }
}
