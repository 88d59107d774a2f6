use super::{CaseTool, ToolContext};
use expedientes_core::{timeline::TimelineBuilder, types::Track};

pub fn not_found_message(id: i64) -> String {
    format!("No se encontró el expediente {id}.")
}

pub const NO_ACTIVITY: &str = "No hay actividad registrada para este expediente.";

pub struct VerHistorialTool;

impl CaseTool for VerHistorialTool {
    fn name(&self) -> &str {
        "ver_historial"
    }

    fn description(&self) -> &str {
        "Devuelve el historial de actividad de un expediente, del más reciente al más antiguo \
         (hasta 20 entradas con fecha y descripción). Usar el ID obtenido con buscar_caso. \
         Contarle al cliente qué se hizo en su caso en términos simples. \
         No revelar número de expediente, juzgado ni datos internos."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "expediente_id": {
                    "type": "integer",
                    "description": "ID de referencia devuelto por buscar_caso"
                },
                "track": {
                    "type": "string",
                    "enum": ["ordinario", "despido", "administrativo"],
                    "description": "Fuerza el tipo de trámite; por defecto se toma del expediente"
                }
            },
            "required": ["expediente_id"]
        })
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<serde_json::Value, String> {
        let id = match &args["expediente_id"] {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| "missing required argument: expediente_id".to_string())?;

        let track = args["track"]
            .as_str()
            .map(|t| t.parse::<Track>())
            .transpose()
            .map_err(|e| e.to_string())?;

        let timeline = TimelineBuilder::new(ctx.store, ctx.policy.clone())
            .build_for_id(id, track, ctx.today)
            .map_err(|e| format!("Error al consultar el historial: {e}"))?;

        let Some(timeline) = timeline else {
            return Ok(serde_json::json!({
                "mensaje": not_found_message(id),
                "movimientos": [],
            }));
        };

        if timeline.is_empty() {
            return Ok(serde_json::json!({
                "mensaje": NO_ACTIVITY,
                "movimientos": [],
            }));
        }

        Ok(serde_json::json!({
            "cantidad": timeline.entries.len(),
            "movimientos": timeline.entries,
        }))
    }
}
