use crate::error::Result;
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};

pub const SEARCH_LIMIT: usize = 5;
pub const NO_STATUS: &str = "Sin estado registrado";

/// What a client may be told about a case: caption and status only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub expediente_id: i64,
    pub caratula: String,
    pub estado: String,
}

/// Split a client name into search words.
pub fn name_words(name: &str) -> Vec<String> {
    name.split_whitespace().map(str::to_string).collect()
}

/// Cases whose caption contains every word of `name`, at most five.
pub fn search_by_name(store: &dyn RecordStore, name: &str) -> Result<Vec<CaseSummary>> {
    let words = name_words(name);
    if words.is_empty() {
        return Ok(Vec::new());
    }
    let cases = store.search_cases(&words, SEARCH_LIMIT)?;
    Ok(cases
        .into_iter()
        .map(|c| CaseSummary {
            expediente_id: c.id,
            estado: c
                .estado
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| NO_STATUS.to_string()),
            caratula: c.caratula,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::Case;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        for id in 1..=7 {
            store.add_case(Case {
                id,
                caratula: format!("GOMEZ ANA {id} c/ PROVINCIA ART"),
                estado: if id == 1 { None } else { Some("21 - ABIERTO A PRUEBA".into()) },
                es_srt: false,
                tipo_proceso: None,
            });
        }
        store
    }

    #[test]
    fn results_are_capped_at_five() {
        let hits = search_by_name(&store(), "gomez ana").unwrap();
        assert_eq!(hits.len(), SEARCH_LIMIT);
    }

    #[test]
    fn missing_status_gets_placeholder() {
        let hits = search_by_name(&store(), "Gomez").unwrap();
        assert_eq!(hits[0].expediente_id, 1);
        assert_eq!(hits[0].estado, NO_STATUS);
        assert_eq!(hits[1].estado, "21 - ABIERTO A PRUEBA");
    }

    #[test]
    fn blank_name_returns_nothing() {
        assert!(search_by_name(&store(), "   ").unwrap().is_empty());
    }

    #[test]
    fn words_split_on_whitespace() {
        assert_eq!(name_words("  Perez\tJuan  "), vec!["Perez", "Juan"]);
    }
}
