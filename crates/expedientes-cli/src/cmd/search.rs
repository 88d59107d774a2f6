use crate::output::{print_json, print_table};
use crate::tools::buscar_caso::{no_match_message, EMPTY_NAME, SUGGESTION};
use anyhow::Context;
use expedientes_core::search::search_by_name;
use std::path::Path;

pub fn run(config_path: Option<&Path>, name: &str, json: bool) -> anyhow::Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!(EMPTY_NAME);
    }

    let (_, store) = super::open_store(config_path)?;
    let hits = search_by_name(&store, name).context("case search failed")?;

    if json {
        return print_json(&hits);
    }

    if hits.is_empty() {
        println!("{}", no_match_message(name));
        println!("{SUGGESTION}");
        return Ok(());
    }

    let rows = hits
        .into_iter()
        .map(|h| vec![h.expediente_id.to_string(), h.caratula, h.estado])
        .collect();
    print_table(&["ID", "CARATULA", "ESTADO"], rows);
    Ok(())
}
