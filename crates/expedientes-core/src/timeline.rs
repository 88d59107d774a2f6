//! Timeline orchestration: fetch, fill gaps, persist, merge.
//!
//! The only component with side effects. Store failures never abort a build:
//! failed reads count as empty and failed writes are logged and dropped, so a
//! timeline is always produced from whatever data came back.

use crate::classifier::Classifier;
use crate::config::TimelinePolicy;
use crate::error::Result;
use crate::gap_filler::{fill_gap, FillContext, FillRequest};
use crate::rules::default_rules;
use crate::stage::stage_from_status;
use crate::store::RecordStore;
use crate::types::{
    Case, Origin, RawMovement, Stage, SyntheticFollowUp, TimelineEntry, Track,
};
use crate::vocabulary::text_for_tag;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

/// Result of one timeline build.
#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    pub case_id: i64,
    pub track: Track,
    pub stage: Stage,
    pub entries: Vec<TimelineEntry>,
    /// Follow-ups synthesized by this build.
    pub generated: usize,
}

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A real movement after classification.
struct LabeledMovement {
    date: NaiveDate,
    label: String,
}

pub struct TimelineBuilder<'s> {
    store: &'s dyn RecordStore,
    policy: TimelinePolicy,
    classifier: Classifier,
}

impl<'s> TimelineBuilder<'s> {
    pub fn new(store: &'s dyn RecordStore, policy: TimelinePolicy) -> Self {
        Self {
            store,
            policy,
            classifier: Classifier::new(default_rules()),
        }
    }

    /// Look the case up and build its timeline. `track` overrides the track
    /// derived from the case row. A failed lookup is an error; an unknown id
    /// is `None`.
    pub fn build_for_id(
        &self,
        case_id: i64,
        track: Option<Track>,
        today: NaiveDate,
    ) -> Result<Option<Timeline>> {
        let Some(case) = self.store.find_case(case_id)? else {
            return Ok(None);
        };
        let track = track.unwrap_or_else(|| case.track());
        Ok(Some(self.build(&case, track, today)))
    }

    pub fn build(&self, case: &Case, track: Track, today: NaiveDate) -> Timeline {
        let stage = stage_from_status(case.status());

        let real = self.fetch_real(case.id, track);
        let mut persisted = self.fetch_persisted(case.id);

        // Follow-ups older than the first known movement cover a period that
        // is no longer considered empty.
        if let Some(earliest) = real.last().map(|m| m.date) {
            persisted.retain(|f| f.date >= earliest);
        }

        let mut ctx = FillContext::default();
        ctx.occupied.extend(real.iter().map(|m| m.date));
        ctx.occupied.extend(persisted.iter().map(|f| f.date));
        ctx.consumed.extend(persisted.iter().map(|f| f.tag.clone()));
        ctx.last_tag = persisted.first().map(|f| f.tag.clone());

        let fill = |from: NaiveDate, to: NaiveDate, ctx: &mut FillContext| {
            let req = FillRequest {
                case_id: case.id,
                from,
                to,
                stage,
                track,
                status: case.status(),
            };
            fill_gap(&req, ctx)
        };

        let mut generated = Vec::new();
        if let Some(newest) = real.first().map(|m| m.date) {
            if (today - newest).num_days() > self.policy.recent_gap_days {
                debug!(case_id = case.id, %newest, "filling silence since newest movement");
                generated.extend(fill(newest, today, &mut ctx));
            }
            for pair in real.windows(2) {
                let (newer, older) = (pair[0].date, pair[1].date);
                if (newer - older).num_days() > self.policy.between_gap_days {
                    debug!(case_id = case.id, %older, %newer, "filling gap between movements");
                    generated.extend(fill(older, newer, &mut ctx));
                }
            }
        } else if persisted.is_empty() {
            let from = today - Duration::days(self.policy.cold_window_days);
            debug!(case_id = case.id, %from, "no history, filling cold window");
            generated.extend(fill(from, today, &mut ctx));
        }

        if !generated.is_empty() {
            if let Err(e) = self.store.insert_follow_ups(&generated) {
                warn!(case_id = case.id, error = %e, "failed to persist follow-ups");
            }
        }

        let count = generated.len();
        let entries = self.merge(real, persisted, generated);
        Timeline {
            case_id: case.id,
            track,
            stage,
            entries,
            generated: count,
        }
    }

    /// Real movements with a well-formed date, labeled and newest first.
    fn fetch_real(&self, case_id: i64, track: Track) -> Vec<LabeledMovement> {
        let records = self
            .store
            .movements(case_id, track, self.policy.movement_limit)
            .unwrap_or_else(|e| {
                warn!(case_id, error = %e, "failed to fetch movements");
                Vec::new()
            });

        let mut real: Vec<LabeledMovement> = records
            .iter()
            .filter_map(RawMovement::from_record)
            .map(|m| LabeledMovement {
                date: m.date,
                label: self.classifier.classify(&m.kind, &m.description, track).text,
            })
            .collect();
        real.sort_by(|a, b| b.date.cmp(&a.date));
        real
    }

    /// Persisted follow-ups with a well-formed date, newest first.
    fn fetch_persisted(&self, case_id: i64) -> Vec<SyntheticFollowUp> {
        let records = self.store.follow_ups(case_id).unwrap_or_else(|e| {
            warn!(case_id, error = %e, "failed to fetch follow-ups");
            Vec::new()
        });

        let mut persisted: Vec<SyntheticFollowUp> = records
            .iter()
            .filter_map(SyntheticFollowUp::from_record)
            .map(|mut f| {
                if f.text.trim().is_empty() {
                    f.text = text_for_tag(&f.tag).unwrap_or_default().to_string();
                }
                f
            })
            .collect();
        persisted.sort_by(|a, b| b.date.cmp(&a.date));
        persisted
    }

    fn merge(
        &self,
        real: Vec<LabeledMovement>,
        persisted: Vec<SyntheticFollowUp>,
        generated: Vec<SyntheticFollowUp>,
    ) -> Vec<TimelineEntry> {
        let mut entries: Vec<TimelineEntry> = real
            .into_iter()
            .map(|m| TimelineEntry {
                date: m.date,
                text: m.label,
                origin: Origin::Real,
            })
            .chain(
                persisted
                    .into_iter()
                    .chain(generated)
                    .map(|f| TimelineEntry {
                        date: f.date,
                        text: f.text,
                        origin: Origin::Synthetic,
                    }),
            )
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        let mut entries = collapse_synthetic_repeats(entries);
        entries.truncate(self.policy.max_entries);
        entries
    }
}

/// Drop a synthetic entry whose text repeats the synthetic entry right
/// before it. Real entries are always kept.
pub fn collapse_synthetic_repeats(entries: Vec<TimelineEntry>) -> Vec<TimelineEntry> {
    let mut out: Vec<TimelineEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let repeats = matches!(
            out.last(),
            Some(prev) if prev.origin == Origin::Synthetic
                && entry.origin == Origin::Synthetic
                && prev.text == entry.text
        );
        if !repeats {
            out.push(entry);
        }
    }
    out
}
