use crate::output::{print_json, print_table};
use crate::tools::ver_historial::NO_ACTIVITY;
use anyhow::Context;
use expedientes_core::{timeline::TimelineBuilder, types::{Origin, Track}, ExpedienteError};
use std::path::Path;

pub fn run(config_path: Option<&Path>, id: i64, track: Option<&str>, json: bool) -> anyhow::Result<()> {
    let track: Option<Track> = track.map(str::parse).transpose()?;
    let (config, store) = super::open_store(config_path)?;

    let timeline = TimelineBuilder::new(&store, config.timeline)
        .build_for_id(id, track, super::today())
        .with_context(|| format!("failed to load case {id}"))?
        .ok_or(ExpedienteError::CaseNotFound(id))?;

    if json {
        return print_json(&timeline);
    }

    println!(
        "Expediente {} | trámite {} | etapa {} ({})",
        timeline.case_id,
        timeline.track,
        timeline.stage.number(),
        timeline.stage.as_str()
    );
    if timeline.is_empty() {
        println!("{NO_ACTIVITY}");
        return Ok(());
    }

    let rows = timeline
        .entries
        .into_iter()
        .map(|e| {
            let origin = match e.origin {
                Origin::Real => "real",
                Origin::Synthetic => "seguimiento",
            };
            vec![e.date.to_string(), e.text, origin.to_string()]
        })
        .collect();
    print_table(&["FECHA", "DESCRIPCION", "ORIGEN"], rows);
    Ok(())
}
