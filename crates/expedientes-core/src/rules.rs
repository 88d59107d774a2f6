use crate::classifier::{Category, KindGroup, MovementContext, Rule};

// ---------------------------------------------------------------------------
// Helper macro for concise rule definitions
// ---------------------------------------------------------------------------

macro_rules! rule {
    ($id:expr, $cond:expr => $label:expr) => {
        Rule {
            id: $id,
            condition: $cond,
            label: $label,
        }
    };
}

/// The three ordered rule lists scanned by the classifier.
pub struct RuleSet {
    pub kind_groups: Vec<KindGroup>,
    pub administrative: Vec<Rule>,
    pub generic: Vec<Rule>,
}

// ---------------------------------------------------------------------------
// Track-dependent labels
// ---------------------------------------------------------------------------

fn notice_label(ctx: &MovementContext) -> &'static str {
    if ctx.track.is_administrative() {
        "Notificación"
    } else {
        "Notificación judicial"
    }
}

fn court_order_label(ctx: &MovementContext) -> &'static str {
    if ctx.track.is_administrative() {
        "Providencia de la comisión"
    } else {
        "Despacho del juzgado"
    }
}

fn always(_: &MovementContext) -> bool {
    true
}

const NOTICE_WORDS: &[&str] = &["notific", "cedula", "cédula"];
const EXPERT_WORDS: &[&str] = &["peric", "perit"];

// ---------------------------------------------------------------------------
// Kind groups
// ---------------------------------------------------------------------------

fn notice_group() -> KindGroup {
    KindGroup {
        category: Category::Notice,
        matches_kind: |c| c.kind_has(NOTICE_WORDS) || c.kind_has(&["mandamiento"]),
        rules: vec![
            rule!("notice_judgment", |c| c.desc_has(&["sentencia"]) => |_| "Notificación de sentencia"),
            rule!("notice_transfer", |c| c.desc_has(&["traslado"]) => |_| "Traslado notificado"),
            rule!("notice_hearing", |c| c.desc_has(&["audiencia"]) => |_| "Notificación de audiencia"),
            rule!("notice_any", always => notice_label),
        ],
    }
}

fn fee_group() -> KindGroup {
    KindGroup {
        category: Category::Fee,
        matches_kind: |c| c.kind_has(&["tasa", "honorario", "arancel", "bono"]),
        rules: vec![
            rule!("fee_regulation", |c| c.desc_has(&["regula"]) => |_| "Regulación de costas"),
            rule!("fee_court_tax", |c| c.desc_has(&["tasa de justicia"]) => |_| "Tasa de justicia"),
            rule!("fee_payment", |c| c.desc_has(&["pago", "deposit"]) => |_| "Pago de costas registrado"),
            rule!("fee_any", always => |_| "Movimiento de costas"),
        ],
    }
}

fn court_order_group() -> KindGroup {
    KindGroup {
        category: Category::CourtOrder,
        matches_kind: |c| c.kind_has(&["despacho", "providencia", "resoluci"]),
        rules: vec![
            rule!("order_judgment", |c| c.desc_has(&["sentencia"]) => |_| "Sentencia dictada"),
            rule!("order_hearing", |c| c.desc_has(&["audiencia"]) => |_| "Juzgado fijó audiencia"),
            rule!(
                "order_evidence_opening",
                |c| c.desc_has(&["abre a prueba", "apertura a prueba", "abrió a prueba"])
                    => |_| "Juzgado abrió a prueba"
            ),
            rule!("order_referral", |c| c.desc_has(&["remit", "eleva", "pase a"]) => |_| "Expediente remitido"),
            rule!("order_expert", |c| c.desc_has(EXPERT_WORDS) => |_| "Despacho sobre pericia"),
            rule!(
                "order_notice",
                |c| c.desc_has(&["notifíquese", "notifiquese", "traslado"])
                    => |_| "Juzgado ordenó notificar"
            ),
            rule!("order_any", always => court_order_label),
        ],
    }
}

fn brief_group() -> KindGroup {
    KindGroup {
        category: Category::Brief,
        matches_kind: |c| c.kind_has(&["escrito", "presentaci"]),
        rules: vec![
            rule!(
                "brief_answer",
                |c| c.desc_has(&["contesta"]) && c.desc_has(&["demanda"])
                    => |_| "Contestación de demanda"
            ),
            rule!(
                "brief_transfer_answer",
                |c| c.desc_has(&["contesta"]) && c.desc_has(&["traslado"])
                    => |_| "Contestación de traslado"
            ),
            rule!("brief_closing", |c| c.desc_has(&["alega"]) => |_| "Alegato presentado"),
            rule!("brief_appeal", |c| c.desc_has(&["apela", "recurso", "recurre"]) => |_| "Recurso presentado"),
            rule!("brief_evidence", |c| c.desc_has(&["prueba"]) => |_| "Escrito de prueba presentado"),
            rule!("brief_expert", |c| c.desc_has(EXPERT_WORDS) => |_| "Presentación sobre pericia"),
            rule!("brief_any", always => |_| "Escrito presentado"),
        ],
    }
}

fn docket_group() -> KindGroup {
    KindGroup {
        category: Category::Docket,
        matches_kind: |c| c.kind_has(&["movimiento", "pase", "cargo", "recepci"]),
        rules: vec![
            rule!("docket_appeals_court", |c| c.desc_has(&["camara", "cámara"]) => |_| "Expediente en Cámara"),
            rule!("docket_to_chambers", |c| c.desc_has(&["despacho"]) => |_| "Expediente a despacho"),
            rule!("docket_archived", |c| c.desc_has(&["archiv"]) => |_| "Expediente archivado"),
            rule!("docket_returned", |c| c.desc_has(&["devuel", "vuelve"]) => |_| "Expediente devuelto al juzgado"),
            rule!("docket_any", always => |_| "Movimiento de expediente"),
        ],
    }
}

fn procedural_event_group() -> KindGroup {
    KindGroup {
        category: Category::ProceduralEvent,
        matches_kind: |c| c.kind_has(&["evento", "actuaci", "audiencia"]),
        rules: vec![
            rule!(
                "event_hearing_held",
                |c| c.desc_has(&["audiencia"]) && c.desc_has(&["celebr", "realiz"])
                    => |_| "Audiencia celebrada"
            ),
            rule!("event_hearing", |c| c.desc_has(&["audiencia"]) => |_| "Audiencia programada"),
            rule!("event_conciliation", |c| c.desc_has(&["mediaci", "conciliaci"]) => |_| "Instancia de conciliación"),
            rule!("event_any", always => |_| "Actuación procesal"),
        ],
    }
}

// ---------------------------------------------------------------------------
// Administrative / medical-board rules
// ---------------------------------------------------------------------------

fn administrative_rules() -> Vec<Rule> {
    vec![
        rule!(
            "admin_hearing_scheduled",
            |c| c.desc_has(&["audiencia"]) && c.desc_has(&["fija", "fijó", "program", "citaci", "convoca"])
                => |_| "Audiencia médica programada"
        ),
        rule!(
            "admin_virtual_hearing",
            |c| c.desc_has(&["audiencia"]) && c.desc_has(&["virtual", "videoconferencia", "celebr", "realiz"])
                => |_| "Audiencia virtual realizada"
        ),
        rule!("admin_opinion", |c| c.desc_has(&["dictamen"]) => |_| "Dictamen médico emitido"),
        rule!("admin_settlement_homologated", |c| c.desc_has(&["homolog"]) => |_| "Acuerdo homologado"),
        rule!(
            "admin_settlement_negotiated",
            |c| c.desc_has(&["acuerdo", "propuesta", "negocia"]) => |_| "Acuerdo en negociación"
        ),
        rule!(
            "admin_records_requested",
            |c| c.desc_has(&["historia clinica", "historia clínica", "estudios"])
                => |_| "Solicitud de historia clínica y estudios"
        ),
        rule!(
            "admin_disability",
            |c| c.desc_has(&["incapacidad", "porcentaje"]) => |_| "Determinación de incapacidad"
        ),
    ]
}

// ---------------------------------------------------------------------------
// Generic rules
// ---------------------------------------------------------------------------

fn generic_rules() -> Vec<Rule> {
    vec![
        rule!("generic_notice", |c| c.desc_has(NOTICE_WORDS) => notice_label),
        rule!("generic_judgment", |c| c.desc_has(&["sentencia"]) => |_| "Sentencia dictada"),
        rule!("generic_expert", |c| c.desc_has(EXPERT_WORDS) => |_| "Informe pericial"),
        rule!("generic_closing", |c| c.desc_has(&["alegato"]) => |_| "Alegatos"),
        rule!("generic_appeal", |c| c.desc_has(&["apela", "recurso"]) => |_| "Recurso de apelación"),
        rule!("generic_elevation", |c| c.desc_has(&["eleva", "remit"]) => |_| "Expediente elevado"),
        rule!(
            "generic_payment",
            |c| c.desc_has(&["pago", "cobro", "deposit", "liquidaci"]) => |_| "Pago y cobro"
        ),
        rule!(
            "generic_representation",
            |c| c.desc_has(&["poder", "apoderad", "representaci"]) => |_| "Representación acreditada"
        ),
    ]
}

/// Rule lists in their declared evaluation order.
pub fn default_rules() -> RuleSet {
    RuleSet {
        kind_groups: vec![
            notice_group(),
            fee_group(),
            court_order_group(),
            brief_group(),
            docket_group(),
            procedural_event_group(),
        ],
        administrative: administrative_rules(),
        generic: generic_rules(),
    }
}
