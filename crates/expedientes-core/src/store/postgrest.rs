//! PostgREST (Supabase) adapter.

use super::RecordStore;
use crate::config::{Collections, StoreConfig};
use crate::error::{ExpedienteError, Result};
use crate::types::{Case, FollowUpRecord, MovementRecord, SyntheticFollowUp, Track};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::info;

const CASE_COLUMNS: &str = "id,caratula,estado,es_srt,tipo_proceso";
const SEARCH_COLUMNS: &str = "id,caratula,estado";
const MOVEMENT_COLUMNS: &str = "fecha,tipo,descripcion";
const FOLLOW_UP_COLUMNS: &str = "expediente_id,fecha,tipo,descripcion";
const FOLLOW_UP_CONFLICT_KEY: &str = "expediente_id,fecha,tipo";

pub struct PostgrestStore {
    client: Client,
    base_url: String,
    key: String,
    collections: Collections,
}

impl PostgrestStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            collections: config.collections.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.key).bearer_auth(&self.key)
    }

    fn get_rows<T: DeserializeOwned>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let url = self.table_url(table);
        info!(table, "querying record store");
        let resp = self.authorized(self.client.get(&url).query(query)).send()?;
        let resp = check_status(resp)?;
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn movement_table(&self, track: Track) -> &str {
        if track.is_administrative() {
            &self.collections.administrative_movements
        } else {
            &self.collections.judicial_movements
        }
    }
}

fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(ExpedienteError::Store {
        status: status.as_u16(),
        body,
    })
}

/// Strip characters that carry meaning inside a PostgREST logic tree.
fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '"' | '*' | '%'))
        .collect()
}

impl RecordStore for PostgrestStore {
    fn find_case(&self, id: i64) -> Result<Option<Case>> {
        let rows: Vec<Case> = self.get_rows(
            &self.collections.cases,
            &[
                ("select", CASE_COLUMNS.to_string()),
                ("id", format!("eq.{id}")),
                ("limit", "1".to_string()),
            ],
        )?;
        Ok(rows.into_iter().next())
    }

    fn search_cases(&self, words: &[String], limit: usize) -> Result<Vec<Case>> {
        let words: Vec<String> = words
            .iter()
            .map(|w| sanitize_word(w))
            .filter(|w| !w.is_empty())
            .collect();
        let mut query = vec![
            ("select", SEARCH_COLUMNS.to_string()),
            ("limit", limit.to_string()),
        ];
        match words.as_slice() {
            [] => return Ok(Vec::new()),
            [word] => query.push(("caratula", format!("ilike.%{word}%"))),
            many => {
                let conditions: Vec<String> = many
                    .iter()
                    .map(|w| format!("caratula.ilike.%{w}%"))
                    .collect();
                query.push(("and", format!("({})", conditions.join(","))));
            }
        }
        self.get_rows(&self.collections.cases, &query)
    }

    fn movements(&self, case_id: i64, track: Track, limit: usize) -> Result<Vec<MovementRecord>> {
        self.get_rows(
            self.movement_table(track),
            &[
                ("select", MOVEMENT_COLUMNS.to_string()),
                ("expediente_id", format!("eq.{case_id}")),
                ("order", "fecha.desc".to_string()),
                ("limit", limit.to_string()),
            ],
        )
    }

    fn follow_ups(&self, case_id: i64) -> Result<Vec<FollowUpRecord>> {
        self.get_rows(
            &self.collections.follow_ups,
            &[
                ("select", FOLLOW_UP_COLUMNS.to_string()),
                ("expediente_id", format!("eq.{case_id}")),
                ("order", "fecha.desc".to_string()),
            ],
        )
    }

    fn insert_follow_ups(&self, entries: &[SyntheticFollowUp]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let url = self.table_url(&self.collections.follow_ups);
        info!(count = entries.len(), "persisting follow-ups");
        let resp = self
            .authorized(self.client.post(&url))
            .query(&[("on_conflict", FOLLOW_UP_CONFLICT_KEY)])
            .header("Prefer", "resolution=ignore-duplicates,return=minimal")
            .json(entries)
            .send()?;
        check_status(resp)?;
        Ok(())
    }
}
