use super::RecordStore;
use crate::error::{ExpedienteError, Result};
use crate::types::{Case, FollowUpRecord, MovementRecord, SyntheticFollowUp, Track};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    cases: Vec<Case>,
    /// Keyed by (case id, administrative collection).
    movements: HashMap<(i64, bool), Vec<MovementRecord>>,
    follow_ups: Vec<FollowUpRecord>,
}

/// In-process record store with insert-ignore semantics on follow-ups.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every read returns a transport-style error.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Every insert returns a transport-style error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn add_case(&self, case: Case) {
        self.lock().cases.push(case);
    }

    pub fn add_movement(&self, case_id: i64, track: Track, fecha: &str, tipo: &str, descripcion: &str) {
        self.lock()
            .movements
            .entry((case_id, track.is_administrative()))
            .or_default()
            .push(MovementRecord {
                fecha: Some(fecha.to_string()),
                tipo: Some(tipo.to_string()),
                descripcion: Some(descripcion.to_string()),
            });
    }

    pub fn add_follow_up_record(&self, record: FollowUpRecord) {
        self.lock().follow_ups.push(record);
    }

    pub fn follow_up_count(&self, case_id: i64) -> usize {
        self.lock()
            .follow_ups
            .iter()
            .filter(|f| f.expediente_id == case_id)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn unavailable() -> ExpedienteError {
        ExpedienteError::Store {
            status: 503,
            body: "memory store unavailable".to_string(),
        }
    }
}

fn by_fecha_desc(a: &Option<String>, b: &Option<String>) -> std::cmp::Ordering {
    b.as_deref().unwrap_or("").cmp(a.as_deref().unwrap_or(""))
}

impl RecordStore for MemoryStore {
    fn find_case(&self, id: i64) -> Result<Option<Case>> {
        if self.fail_reads {
            return Err(Self::unavailable());
        }
        Ok(self.lock().cases.iter().find(|c| c.id == id).cloned())
    }

    fn search_cases(&self, words: &[String], limit: usize) -> Result<Vec<Case>> {
        if self.fail_reads {
            return Err(Self::unavailable());
        }
        let words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        Ok(self
            .lock()
            .cases
            .iter()
            .filter(|c| {
                let caption = c.caratula.to_lowercase();
                words.iter().all(|w| caption.contains(w.as_str()))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    fn movements(&self, case_id: i64, track: Track, limit: usize) -> Result<Vec<MovementRecord>> {
        if self.fail_reads {
            return Err(Self::unavailable());
        }
        let mut rows = self
            .lock()
            .movements
            .get(&(case_id, track.is_administrative()))
            .cloned()
            .unwrap_or_default();
        rows.sort_by(|a, b| by_fecha_desc(&a.fecha, &b.fecha));
        rows.truncate(limit);
        Ok(rows)
    }

    fn follow_ups(&self, case_id: i64) -> Result<Vec<FollowUpRecord>> {
        if self.fail_reads {
            return Err(Self::unavailable());
        }
        let mut rows: Vec<FollowUpRecord> = self
            .lock()
            .follow_ups
            .iter()
            .filter(|f| f.expediente_id == case_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| by_fecha_desc(&a.fecha, &b.fecha));
        Ok(rows)
    }

    fn insert_follow_ups(&self, entries: &[SyntheticFollowUp]) -> Result<()> {
        if self.fail_writes {
            return Err(Self::unavailable());
        }
        let mut inner = self.lock();
        for entry in entries {
            let (case_id, date, tag) = entry.key();
            let fecha = date.to_string();
            let exists = inner.follow_ups.iter().any(|f| {
                f.expediente_id == case_id
                    && f.fecha.as_deref() == Some(fecha.as_str())
                    && f.tipo.as_deref() == Some(tag)
            });
            if !exists {
                inner.follow_ups.push(FollowUpRecord {
                    expediente_id: entry.case_id,
                    fecha: Some(fecha),
                    tipo: Some(entry.tag.clone()),
                    descripcion: Some(entry.text.clone()),
                });
            }
        }
        Ok(())
    }
}
