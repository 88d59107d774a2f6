use chrono::NaiveDate;
use expedientes_core::{config::TimelinePolicy, store::RecordStore};

pub mod buscar_caso;
pub mod ver_historial;

/// What a tool call may touch: the record store, the timeline thresholds and
/// the date the call treats as "now".
pub struct ToolContext<'a> {
    pub store: &'a dyn RecordStore,
    pub policy: &'a TimelinePolicy,
    pub today: NaiveDate,
}

pub trait CaseTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn schema(&self) -> serde_json::Value;
    fn call(&self, args: serde_json::Value, ctx: &ToolContext) -> Result<serde_json::Value, String>;
}

pub fn all_tools() -> Vec<Box<dyn CaseTool>> {
    vec![
        Box::new(buscar_caso::BuscarCasoTool),
        Box::new(ver_historial::VerHistorialTool),
    ]
}
