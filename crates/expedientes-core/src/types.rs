use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

/// Procedural regime a case follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    /// Ordinary judicial proceeding.
    #[serde(rename = "ordinario")]
    Ordinary,
    /// Judicial termination claim (despido).
    #[serde(rename = "despido")]
    Dismissal,
    /// Administrative track before the medical boards.
    #[serde(rename = "administrativo")]
    Administrative,
}

impl Track {
    pub fn all() -> &'static [Track] {
        &[Track::Ordinary, Track::Dismissal, Track::Administrative]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Track::Ordinary => "ordinario",
            Track::Dismissal => "despido",
            Track::Administrative => "administrativo",
        }
    }

    pub fn is_administrative(self) -> bool {
        matches!(self, Track::Administrative)
    }

    /// Judicial tracks observe the court recess.
    pub fn observes_recess(self) -> bool {
        !self.is_administrative()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Track {
    type Err = crate::error::ExpedienteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ordinario" | "judicial" => Ok(Track::Ordinary),
            "despido" => Ok(Track::Dismissal),
            "administrativo" | "srt" | "comision_medica" => Ok(Track::Administrative),
            _ => Err(crate::error::ExpedienteError::InvalidTrack(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Ordinal pipeline stage, 1 (intake) through 8 (closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intake,
    Evidence,
    ClosingArguments,
    PreAppeal,
    Appeal,
    SupremeReview,
    PostJudgment,
    Closed,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Intake,
            Stage::Evidence,
            Stage::ClosingArguments,
            Stage::PreAppeal,
            Stage::Appeal,
            Stage::SupremeReview,
            Stage::PostJudgment,
            Stage::Closed,
        ]
    }

    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Stage> {
        Stage::all().get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Intake => "intake",
            Stage::Evidence => "evidence",
            Stage::ClosingArguments => "closing_arguments",
            Stage::PreAppeal => "pre_appeal",
            Stage::Appeal => "appeal",
            Stage::SupremeReview => "supreme_review",
            Stage::PostJudgment => "post_judgment",
            Stage::Closed => "closed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

/// A case file as stored in the `expedientes` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: i64,
    #[serde(default)]
    pub caratula: String,
    #[serde(default)]
    pub estado: Option<String>,
    /// Set for cases handled before the medical boards.
    #[serde(default, deserialize_with = "null_as_false")]
    pub es_srt: bool,
    #[serde(default)]
    pub tipo_proceso: Option<String>,
}

fn null_as_false<'de, D: serde::Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or(false))
}

impl Case {
    pub fn status(&self) -> &str {
        self.estado.as_deref().unwrap_or("")
    }

    pub fn track(&self) -> Track {
        if self.es_srt {
            return Track::Administrative;
        }
        match self.tipo_proceso.as_deref() {
            Some(t) if t.to_lowercase().contains("despido") => Track::Dismissal,
            _ => Track::Ordinary,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw movements
// ---------------------------------------------------------------------------

/// Row shape of a real movement as returned by the record store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementRecord {
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// A real, externally recorded procedural event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMovement {
    pub date: NaiveDate,
    pub kind: String,
    pub description: String,
}

impl RawMovement {
    /// Returns `None` when the record carries no well-formed date.
    pub fn from_record(record: &MovementRecord) -> Option<Self> {
        let date = parse_record_date(record.fecha.as_deref()?)?;
        Some(Self {
            date,
            kind: record.tipo.clone().unwrap_or_default(),
            description: record.descripcion.clone().unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Synthetic follow-ups
// ---------------------------------------------------------------------------

/// Row shape of a persisted follow-up as returned by the record store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUpRecord {
    #[serde(default)]
    pub expediente_id: i64,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// A generated internal-activity entry. Never updated once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticFollowUp {
    #[serde(rename = "expediente_id")]
    pub case_id: i64,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "tipo")]
    pub tag: String,
    #[serde(rename = "descripcion")]
    pub text: String,
}

impl SyntheticFollowUp {
    pub fn from_record(record: &FollowUpRecord) -> Option<Self> {
        let date = parse_record_date(record.fecha.as_deref()?)?;
        Some(Self {
            case_id: record.expediente_id,
            date,
            tag: record.tipo.clone().unwrap_or_default(),
            text: record.descripcion.clone().unwrap_or_default(),
        })
    }

    /// Natural key used for insert-ignore persistence.
    pub fn key(&self) -> (i64, NaiveDate, &str) {
        (self.case_id, self.date, self.tag.as_str())
    }
}

// ---------------------------------------------------------------------------
// Timeline view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Real,
    Synthetic,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Real => "real",
            Origin::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the merged timeline. Derived on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "descripcion")]
    pub text: String,
    #[serde(rename = "origen")]
    pub origin: Origin,
}

/// Parse the calendar day out of a store date or timestamp string.
///
/// Accepts `YYYY-MM-DD` optionally followed by a time component.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10)?;
    if raw.len() > 10 && !matches!(raw.as_bytes()[10], b'T' | b' ') {
        return None;
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_numbers_round_trip() {
        for stage in Stage::all() {
            assert_eq!(Stage::from_number(stage.number()), Some(*stage));
        }
        assert_eq!(Stage::Intake.number(), 1);
        assert_eq!(Stage::Closed.number(), 8);
        assert_eq!(Stage::from_number(0), None);
        assert_eq!(Stage::from_number(9), None);
    }

    #[test]
    fn track_parses_aliases() {
        assert_eq!("srt".parse::<Track>().unwrap(), Track::Administrative);
        assert_eq!("Judicial".parse::<Track>().unwrap(), Track::Ordinary);
        assert_eq!("despido".parse::<Track>().unwrap(), Track::Dismissal);
        assert!("laboral".parse::<Track>().is_err());
    }

    #[test]
    fn case_row_tolerates_nulls_and_missing_columns() {
        let case: Case =
            serde_json::from_str(r#"{"id":3,"caratula":"GOMEZ ANA","estado":null,"es_srt":null}"#)
                .unwrap();
        assert!(!case.es_srt);
        assert_eq!(case.status(), "");
        let case: Case = serde_json::from_str(r#"{"id":4,"caratula":"X"}"#).unwrap();
        assert_eq!(case.track(), Track::Ordinary);
    }

    #[test]
    fn case_track_prefers_administrative_flag() {
        let case = Case {
            id: 7,
            caratula: "PEREZ JUAN c/ ART".into(),
            estado: None,
            es_srt: true,
            tipo_proceso: Some("despido".into()),
        };
        assert_eq!(case.track(), Track::Administrative);

        let case = Case {
            es_srt: false,
            ..case
        };
        assert_eq!(case.track(), Track::Dismissal);
    }

    #[test]
    fn parse_record_date_accepts_timestamps() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_record_date("2024-03-15"), Some(d));
        assert_eq!(parse_record_date("2024-03-15T10:22:00+00:00"), Some(d));
        assert_eq!(parse_record_date(" 2024-03-15 08:00:00"), Some(d));
    }

    #[test]
    fn parse_record_date_rejects_malformed() {
        assert_eq!(parse_record_date(""), None);
        assert_eq!(parse_record_date("15/03/2024"), None);
        assert_eq!(parse_record_date("2024-02-30"), None);
        assert_eq!(parse_record_date("2024-03-155"), None);
        assert_eq!(parse_record_date("sin fecha"), None);
    }

    #[test]
    fn raw_movement_drops_missing_date() {
        let record = MovementRecord {
            fecha: None,
            tipo: Some("despacho".into()),
            descripcion: None,
        };
        assert!(RawMovement::from_record(&record).is_none());
    }

    #[test]
    fn follow_up_serializes_store_columns() {
        let f = SyntheticFollowUp {
            case_id: 3,
            date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            tag: "control_plazos".into(),
            text: "Control de plazos procesales".into(),
        };
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["expediente_id"], 3);
        assert_eq!(v["fecha"], "2024-05-02");
        assert_eq!(v["tipo"], "control_plazos");
    }
}
