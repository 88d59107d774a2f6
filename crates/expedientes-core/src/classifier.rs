use crate::rules::RuleSet;
use crate::types::Track;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const FALLBACK_MAX_CHARS: usize = 50;

// ---------------------------------------------------------------------------
// MovementContext
// ---------------------------------------------------------------------------

/// Lower-cased view of a raw movement, evaluated by every rule.
pub struct MovementContext<'a> {
    pub kind: String,
    pub description: String,
    pub track: Track,
    raw_kind: &'a str,
    raw_description: &'a str,
}

impl<'a> MovementContext<'a> {
    pub fn new(kind: &'a str, description: &'a str, track: Track) -> Self {
        Self {
            kind: kind.to_lowercase(),
            description: description.to_lowercase(),
            track,
            raw_kind: kind,
            raw_description: description,
        }
    }

    pub fn kind_has(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.kind.contains(n))
    }

    pub fn desc_has(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.description.contains(n))
    }
}

// ---------------------------------------------------------------------------
// Label (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Notice,
    Fee,
    CourtOrder,
    Brief,
    Docket,
    ProceduralEvent,
    Administrative,
    Generic,
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub category: Category,
    /// Id of the rule that fired; `None` for the raw-text fallback.
    pub rule: Option<&'static str>,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A fn-pointer keyword rule.
pub struct Rule {
    pub id: &'static str,
    pub condition: fn(&MovementContext) -> bool,
    pub label: fn(&MovementContext) -> &'static str,
}

/// Rules scoped to one kind of movement. The group is entered when
/// `matches_kind` holds and its last rule is expected to be a catch-all.
pub struct KindGroup {
    pub category: Category,
    pub matches_kind: fn(&MovementContext) -> bool,
    pub rules: Vec<Rule>,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Ordered keyword classifier. Declared order is the tie-break: the first
/// satisfied predicate wins.
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn classify(&self, kind: &str, description: &str, track: Track) -> Label {
        let ctx = MovementContext::new(kind, description, track);

        if let Some(group) = self.rules.kind_groups.iter().find(|g| (g.matches_kind)(&ctx)) {
            if let Some(label) = first_match(&group.rules, group.category, &ctx) {
                return label;
            }
        }

        if let Some(label) = first_match(&self.rules.administrative, Category::Administrative, &ctx)
        {
            return label;
        }

        if let Some(label) = first_match(&self.rules.generic, Category::Generic, &ctx) {
            return label;
        }

        Label {
            category: Category::Unmatched,
            rule: None,
            text: fallback_text(ctx.raw_kind, ctx.raw_description),
        }
    }
}

fn first_match(rules: &[Rule], category: Category, ctx: &MovementContext) -> Option<Label> {
    rules.iter().find(|r| (r.condition)(ctx)).map(|r| Label {
        category,
        rule: Some(r.id),
        text: (r.label)(ctx).to_string(),
    })
}

static FEES_RE: OnceLock<Regex> = OnceLock::new();

fn fees_re() -> &'static Regex {
    FEES_RE.get_or_init(|| Regex::new(r"(?i)honorarios").unwrap())
}

/// Raw description (or kind when the description is blank), with fee wording
/// softened and cut to 50 characters.
fn fallback_text(kind: &str, description: &str) -> String {
    let source = if description.trim().is_empty() {
        kind.trim()
    } else {
        description.trim()
    };
    if source.is_empty() {
        return "Movimiento registrado".to_string();
    }
    fees_re()
        .replace_all(source, "costas")
        .chars()
        .take(FALLBACK_MAX_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_rules;

    fn label(kind: &str, description: &str, track: Track) -> String {
        Classifier::new(default_rules())
            .classify(kind, description, track)
            .text
    }

    #[test]
    fn court_order_opening_evidence() {
        assert_eq!(
            label("despacho", "se abre a prueba", Track::Ordinary),
            "Juzgado abrió a prueba"
        );
    }

    #[test]
    fn brief_answering_complaint() {
        assert_eq!(
            label("escrito", "contesta la demanda", Track::Ordinary),
            "Contestación de demanda"
        );
    }

    #[test]
    fn notice_label_depends_on_track() {
        assert_eq!(label("", "cédula", Track::Ordinary), "Notificación judicial");
        assert_eq!(label("", "cédula", Track::Dismissal), "Notificación judicial");
        assert_eq!(label("", "cédula", Track::Administrative), "Notificación");
        assert_eq!(label("NOTIFICACION", "", Track::Administrative), "Notificación");
    }

    #[test]
    fn court_order_catch_all_depends_on_track() {
        assert_eq!(label("Despacho", "autos", Track::Ordinary), "Despacho del juzgado");
        assert_eq!(
            label("Despacho", "autos", Track::Administrative),
            "Providencia de la comisión"
        );
    }

    #[test]
    fn first_rule_wins_on_overlap() {
        // sentencing is declared before evidentiary opening
        assert_eq!(
            label("despacho", "sentencia; se abre a prueba el incidente", Track::Ordinary),
            "Sentencia dictada"
        );
        // kind group beats the generic list even when generic would match
        assert_eq!(
            label("escrito", "acompaña cédula", Track::Ordinary),
            "Escrito presentado"
        );
    }

    #[test]
    fn kind_matching_is_case_insensitive() {
        assert_eq!(
            label("DESPACHO", "SE ABRE A PRUEBA", Track::Ordinary),
            "Juzgado abrió a prueba"
        );
    }

    #[test]
    fn administrative_rules_apply_without_kind() {
        assert_eq!(
            label("", "Se fija audiencia médica", Track::Administrative),
            "Audiencia médica programada"
        );
        assert_eq!(
            label("", "Audiencia virtual celebrada", Track::Administrative),
            "Audiencia virtual realizada"
        );
        assert_eq!(
            label("", "Dictamen de la comisión", Track::Administrative),
            "Dictamen médico emitido"
        );
        assert_eq!(
            label("", "Acuerdo homologado por el SECLO", Track::Administrative),
            "Acuerdo homologado"
        );
    }

    #[test]
    fn generic_rules_after_administrative() {
        assert_eq!(label("", "Informe del perito", Track::Ordinary), "Informe pericial");
        assert_eq!(label("", "Poder general", Track::Ordinary), "Representación acreditada");
    }

    #[test]
    fn fallback_substitutes_and_truncates() {
        let l = Classifier::new(default_rules()).classify(
            "otro",
            "Honorarios del letrado por la etapa previa del expediente principal",
            Track::Ordinary,
        );
        assert_eq!(l.category, Category::Unmatched);
        assert!(l.text.starts_with("costas del letrado"));
        assert_eq!(l.text.chars().count(), 50);
    }

    #[test]
    fn fallback_uses_kind_when_description_empty() {
        assert_eq!(label("Oficio", "", Track::Ordinary), "Oficio");
        assert_eq!(label("", "", Track::Ordinary), "Movimiento registrado");
    }

    #[test]
    fn fallback_truncates_on_char_boundaries() {
        let long = "ñ".repeat(80);
        assert_eq!(label("otro", &long, Track::Ordinary).chars().count(), 50);
    }

    #[test]
    fn label_records_rule_id() {
        let l = Classifier::new(default_rules()).classify(
            "despacho",
            "se abre a prueba",
            Track::Ordinary,
        );
        assert_eq!(l.category, Category::CourtOrder);
        assert_eq!(l.rule, Some("order_evidence_opening"));
    }
}
