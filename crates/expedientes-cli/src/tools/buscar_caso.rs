use super::{CaseTool, ToolContext};
use expedientes_core::search::search_by_name;

pub const EMPTY_NAME: &str = "Debe proporcionar un nombre para buscar.";
pub const SUGGESTION: &str =
    "Verificar que el nombre esté bien escrito o probar con el apellido solamente.";

pub fn no_match_message(nombre: &str) -> String {
    format!("No se encontraron casos para '{nombre}'.")
}

pub struct BuscarCasoTool;

impl CaseTool for BuscarCasoTool {
    fn name(&self) -> &str {
        "buscar_caso"
    }

    fn description(&self) -> &str {
        "Busca el caso de un cliente por su nombre completo en la base de expedientes legales. \
         Devuelve la carátula, el estado actual y un ID de referencia. \
         IMPORTANTE: solo compartir con el cliente la carátula y el estado del caso, \
         explicando en términos simples en qué consiste ese estado. \
         No revelar número de expediente, juzgado ni datos internos."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "nombre": {
                    "type": "string",
                    "description": "Nombre completo o parcial del cliente (ej: \"Perez Juan\")"
                }
            },
            "required": ["nombre"]
        })
    }

    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<serde_json::Value, String> {
        let nombre = args["nombre"].as_str().unwrap_or("").trim();
        if nombre.is_empty() {
            return Err(EMPTY_NAME.to_string());
        }

        let casos = search_by_name(ctx.store, nombre)
            .map_err(|e| format!("Error al consultar la base de expedientes: {e}"))?;

        if casos.is_empty() {
            return Ok(serde_json::json!({
                "mensaje": no_match_message(nombre),
                "sugerencia": SUGGESTION,
            }));
        }

        Ok(serde_json::json!({
            "cantidad_resultados": casos.len(),
            "casos": casos,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use expedientes_core::{config::TimelinePolicy, store::MemoryStore, types::Case};

    fn call(store: &MemoryStore, args: serde_json::Value) -> Result<serde_json::Value, String> {
        let policy = TimelinePolicy::default();
        let ctx = ToolContext {
            store,
            policy: &policy,
            today: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        BuscarCasoTool.call(args, &ctx)
    }

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.add_case(Case {
            id: 12,
            caratula: "PEREZ JUAN c/ ACME SA s/ DESPIDO".into(),
            estado: Some("21 - ABIERTO A PRUEBA".into()),
            es_srt: false,
            tipo_proceso: Some("despido".into()),
        });
        store
    }

    #[test]
    fn finds_case_by_partial_name() {
        let out = call(&store(), serde_json::json!({"nombre": "juan perez"})).unwrap();
        assert_eq!(out["cantidad_resultados"], 1);
        assert_eq!(out["casos"][0]["expediente_id"], 12);
        assert_eq!(out["casos"][0]["estado"], "21 - ABIERTO A PRUEBA");
    }

    #[test]
    fn blank_name_is_an_error() {
        let err = call(&store(), serde_json::json!({"nombre": "  "})).unwrap_err();
        assert_eq!(err, EMPTY_NAME);
        assert!(call(&store(), serde_json::json!({})).is_err());
    }

    #[test]
    fn no_match_carries_suggestion() {
        let out = call(&store(), serde_json::json!({"nombre": "Gomez"})).unwrap();
        assert_eq!(out["mensaje"], "No se encontraron casos para 'Gomez'.");
        assert_eq!(out["sugerencia"], SUGGESTION);
    }

    #[test]
    fn store_failure_is_reported() {
        let failing = MemoryStore::new().failing_reads();
        let err = call(&failing, serde_json::json!({"nombre": "Perez"})).unwrap_err();
        assert!(err.contains("503"), "{err}");
    }
}
