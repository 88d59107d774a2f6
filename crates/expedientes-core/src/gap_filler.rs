//! Deterministic synthesis of internal follow-ups across a date gap.

use crate::sequence::seeded_int;
use crate::types::{Stage, SyntheticFollowUp, Track};
use crate::vocabulary::{catalog_for, status_mentions_expert_report, FollowUpItem, StageCatalog};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeSet, HashSet};

/// Upper bound on cursor steps per gap.
pub const MAX_STEPS: i64 = 50;

/// Mutable state threaded through every fill of one timeline build.
#[derive(Debug, Clone, Default)]
pub struct FillContext {
    /// Dates already holding a real movement or a follow-up.
    pub occupied: BTreeSet<NaiveDate>,
    /// One-time tags already emitted for the case.
    pub consumed: HashSet<String>,
    /// Tag of the most recent follow-up, to avoid immediate repeats.
    pub last_tag: Option<String>,
}

/// One gap to fill: the half-open range `[from, to)` of a case.
#[derive(Debug, Clone, Copy)]
pub struct FillRequest<'a> {
    pub case_id: i64,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub stage: Stage,
    pub track: Track,
    pub status: &'a str,
}

/// Judicial recess: all of January and the second half of July.
pub fn is_recess(date: NaiveDate) -> bool {
    date.month() == 1 || (date.month() == 7 && date.day() >= 16)
}

pub fn fill_gap(req: &FillRequest, ctx: &mut FillContext) -> Vec<SyntheticFollowUp> {
    let catalog = match catalog_for(req.track, req.stage) {
        StageCatalog::Active(c) => c,
        StageCatalog::Dormant => return Vec::new(),
    };

    let expert_ok = req.track.is_administrative() || status_mentions_expert_report(req.status);
    let one_time: Vec<&FollowUpItem> = catalog
        .one_time
        .iter()
        .filter(|i| expert_ok || !i.needs_expert_report)
        .collect();
    let repeatable = catalog.repeatable;

    let seed = if req.case_id == 0 { 1 } else { req.case_id };
    let mut cursor = req.from + Duration::days(seeded_int(seed, 8, 14, 0));
    let mut out = Vec::new();

    for step in 0..MAX_STEPS {
        if cursor >= req.to {
            break;
        }

        let skip = (req.track.observes_recess() && is_recess(cursor))
            || ctx.occupied.contains(&cursor);

        if !skip {
            if let Some(item) = next_item(&one_time, repeatable, seed, step, ctx) {
                out.push(SyntheticFollowUp {
                    case_id: req.case_id,
                    date: cursor,
                    tag: item.tag.to_string(),
                    text: item.text.to_string(),
                });
                ctx.occupied.insert(cursor);
                ctx.last_tag = Some(item.tag.to_string());
            }
        }

        cursor += Duration::days(seeded_int(seed, 10, 18, step + 100));
    }

    tracing::debug!(
        case_id = req.case_id,
        from = %req.from,
        to = %req.to,
        emitted = out.len(),
        "filled gap"
    );
    out
}

/// Next unconsumed one-time item, else a seeded repeatable pick that avoids
/// repeating the last emitted tag when an alternative exists.
fn next_item<'c>(
    one_time: &[&'c FollowUpItem],
    repeatable: &'c [FollowUpItem],
    seed: i64,
    step: i64,
    ctx: &mut FillContext,
) -> Option<&'c FollowUpItem> {
    if let Some(item) = one_time.iter().copied().find(|i| !ctx.consumed.contains(i.tag)) {
        ctx.consumed.insert(item.tag.to_string());
        return Some(item);
    }

    if repeatable.is_empty() {
        return None;
    }

    let len = repeatable.len();
    let mut idx = seeded_int(seed, 0, len as i64 - 1, step) as usize;
    if len > 1 && ctx.last_tag.as_deref() == Some(repeatable[idx].tag) {
        for k in 1..len {
            let candidate = (idx + k) % len;
            if ctx.last_tag.as_deref() != Some(repeatable[candidate].tag) {
                idx = candidate;
                break;
            }
        }
    }
    Some(&repeatable[idx])
}
