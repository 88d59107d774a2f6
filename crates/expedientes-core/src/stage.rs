//! Status code → pipeline stage mapping.
//!
//! Case statuses arrive as free text led by a two-digit code
//! (`"21 - ABIERTO A PRUEBA"`, `"5"`, `"PERICIA"`). Only the leading code
//! matters; anything unparseable falls back to [`Stage::Intake`].

use crate::types::Stage;
use regex::Regex;
use std::sync::OnceLock;

static LEADING_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn leading_code_re() -> &'static Regex {
    LEADING_CODE_RE.get_or_init(|| Regex::new(r"^\s*([0-9]+)").unwrap())
}

/// Fixed status table for codes 01–92.
///
/// Returns `None` for codes outside the table.
fn stage_for_code(code: &str) -> Option<Stage> {
    let n: u8 = code.parse().ok()?;
    let stage = match n {
        1..=9 => Stage::Intake,
        10..=29 => Stage::Evidence,
        30..=39 => Stage::ClosingArguments,
        40..=49 => Stage::PreAppeal,
        50..=59 => Stage::Appeal,
        60..=69 => Stage::SupremeReview,
        70..=89 => Stage::PostJudgment,
        90..=92 => Stage::Closed,
        _ => return None,
    };
    Some(stage)
}

/// Map a raw status string to its pipeline stage. Total: never fails.
pub fn stage_from_status(status: &str) -> Stage {
    let Some(caps) = leading_code_re().captures(status) else {
        return Stage::Intake;
    };
    let digits = &caps[1];
    let code = format!("{digits:0>2}");
    stage_for_code(&code).unwrap_or(Stage::Intake)
}
