//! Catalogs of internal follow-up activities per (track, stage).
//!
//! One-time items are emitted at most once per case, in catalog order.
//! Repeatable items fill the remaining gap dates.

use crate::types::{Stage, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpItem {
    pub tag: &'static str,
    pub text: &'static str,
    /// Only meaningful once an expert report exists in the case.
    pub needs_expert_report: bool,
}

const fn item(tag: &'static str, text: &'static str) -> FollowUpItem {
    FollowUpItem {
        tag,
        text,
        needs_expert_report: false,
    }
}

const fn expert_item(tag: &'static str, text: &'static str) -> FollowUpItem {
    FollowUpItem {
        tag,
        text,
        needs_expert_report: true,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub one_time: &'static [FollowUpItem],
    pub repeatable: &'static [FollowUpItem],
}

/// What the gap filler may draw from for a (track, stage).
#[derive(Debug, Clone, Copy)]
pub enum StageCatalog {
    Active(&'static Catalog),
    /// No internal activity is plausible (closed or archived cases).
    Dormant,
}

// ---------------------------------------------------------------------------
// Shared repeatable items
// ---------------------------------------------------------------------------

const CONTROL_PLAZOS: FollowUpItem = item("control_plazos", "Control de plazos procesales");
const MESA_ENTRADAS: FollowUpItem =
    item("consulta_mesa_entradas", "Consulta en mesa de entradas del juzgado");
const SEGUIMIENTO_NOTIFICACIONES: FollowUpItem = item(
    "seguimiento_notificaciones",
    "Seguimiento de notificaciones pendientes",
);
const SEGUIMIENTO_COMISION: FollowUpItem = item(
    "seguimiento_comision",
    "Seguimiento del trámite ante la Comisión Médica",
);
const CONSULTA_ART: FollowUpItem = item("consulta_art", "Consulta de estado con la ART");

// ---------------------------------------------------------------------------
// Ordinary judicial track
// ---------------------------------------------------------------------------

static ORDINARY_INTAKE: Catalog = Catalog {
    one_time: &[
        item("analisis_inicial", "Análisis inicial del expediente"),
        item("control_traslado", "Control del traslado de la demanda"),
    ],
    repeatable: &[SEGUIMIENTO_NOTIFICACIONES, MESA_ENTRADAS, CONTROL_PLAZOS],
};

static ORDINARY_EVIDENCE: Catalog = Catalog {
    one_time: &[
        item("control_prueba_ofrecida", "Control de la prueba ofrecida"),
        item("confeccion_oficios", "Confección y seguimiento de oficios"),
        expert_item("control_pericia", "Control del informe pericial"),
        expert_item(
            "analisis_impugnacion_pericia",
            "Análisis de la pericia para eventual impugnación",
        ),
    ],
    repeatable: &[
        item("seguimiento_testigos", "Seguimiento de audiencias testimoniales"),
        CONTROL_PLAZOS,
        MESA_ENTRADAS,
        item("reiteracion_oficios", "Reiteración de oficios pendientes"),
    ],
};

static ORDINARY_CLOSING: Catalog = Catalog {
    one_time: &[
        item("revision_prueba_producida", "Revisión integral de la prueba producida"),
        item("preparacion_alegato", "Preparación del alegato"),
    ],
    repeatable: &[
        CONTROL_PLAZOS,
        item("seguimiento_pase_sentencia", "Seguimiento del pase a sentencia"),
    ],
};

static ORDINARY_PRE_APPEAL: Catalog = Catalog {
    one_time: &[
        item("analisis_sentencia", "Análisis de la sentencia de primera instancia"),
        item("evaluacion_recurso", "Evaluación de la viabilidad del recurso"),
    ],
    repeatable: &[
        CONTROL_PLAZOS,
        item("seguimiento_concesion", "Seguimiento de la concesión del recurso"),
    ],
};

static ORDINARY_APPEAL: Catalog = Catalog {
    one_time: &[
        item("control_elevacion", "Control de la elevación a Cámara"),
        item("preparacion_agravios", "Preparación de la expresión de agravios"),
    ],
    repeatable: &[
        item("consulta_camara", "Consulta del estado en Cámara"),
        CONTROL_PLAZOS,
    ],
};

static ORDINARY_SUPREME: Catalog = Catalog {
    one_time: &[item(
        "analisis_recurso_extraordinario",
        "Análisis del recurso extraordinario",
    )],
    repeatable: &[
        item("consulta_corte", "Consulta del estado ante la Corte"),
        CONTROL_PLAZOS,
    ],
};

static ORDINARY_POST_JUDGMENT: Catalog = Catalog {
    one_time: &[
        item("preparacion_liquidacion", "Preparación de la liquidación"),
        item(
            "control_aprobacion_liquidacion",
            "Control de la aprobación de la liquidación",
        ),
    ],
    repeatable: &[
        item("seguimiento_deposito", "Seguimiento del depósito judicial"),
        item("gestion_cobro", "Gestión de cobro ante la demandada"),
    ],
};

// ---------------------------------------------------------------------------
// Termination-claim track (only the early stages differ)
// ---------------------------------------------------------------------------

static DISMISSAL_INTAKE: Catalog = Catalog {
    one_time: &[
        item("revision_telegramas", "Revisión del intercambio telegráfico"),
        item("calculo_indemnizacion", "Cálculo de la indemnización por despido"),
        item("control_acta_seclo", "Control del acta de cierre del SECLO"),
    ],
    repeatable: &[SEGUIMIENTO_NOTIFICACIONES, MESA_ENTRADAS, CONTROL_PLAZOS],
};

static DISMISSAL_EVIDENCE: Catalog = Catalog {
    one_time: &[
        item("seguimiento_oficio_afip", "Seguimiento del oficio a AFIP"),
        item("control_prueba_ofrecida", "Control de la prueba ofrecida"),
        expert_item("control_pericia_contable", "Control de la pericia contable"),
    ],
    repeatable: &[
        item("seguimiento_testigos", "Seguimiento de audiencias testimoniales"),
        CONTROL_PLAZOS,
        MESA_ENTRADAS,
    ],
};

// ---------------------------------------------------------------------------
// Administrative / medical-board track
// ---------------------------------------------------------------------------

static ADMIN_INTAKE: Catalog = Catalog {
    one_time: &[
        item("revision_historia_clinica", "Revisión de la historia clínica"),
        item("control_turno_comision", "Control del turno ante la Comisión Médica"),
    ],
    repeatable: &[SEGUIMIENTO_COMISION, CONSULTA_ART],
};

static ADMIN_EXAMINATION: Catalog = Catalog {
    one_time: &[
        item("recopilacion_estudios", "Recopilación de estudios complementarios"),
        item("preparacion_audiencia_medica", "Preparación para la audiencia médica"),
    ],
    repeatable: &[SEGUIMIENTO_COMISION, CONSULTA_ART],
};

static ADMIN_OPINION: Catalog = Catalog {
    one_time: &[
        item("analisis_dictamen", "Análisis del dictamen médico"),
        item("evaluacion_acuerdo", "Evaluación de la propuesta de acuerdo"),
    ],
    repeatable: &[
        item("seguimiento_homologacion", "Seguimiento de la homologación"),
        SEGUIMIENTO_COMISION,
    ],
};

static ADMIN_REVIEW: Catalog = Catalog {
    one_time: &[item(
        "preparacion_recurso_central",
        "Preparación del recurso ante la Comisión Médica Central",
    )],
    repeatable: &[
        item("consulta_comision_central", "Consulta del estado ante la Comisión Central"),
        CONSULTA_ART,
    ],
};

static ADMIN_PAYMENT: Catalog = Catalog {
    one_time: &[item("control_pago_art", "Control del pago de la ART")],
    repeatable: &[
        item("seguimiento_pago", "Seguimiento del pago de la indemnización"),
        CONSULTA_ART,
    ],
};

/// Resolve the catalog subtree for a case's track and stage.
pub fn catalog_for(track: Track, stage: Stage) -> StageCatalog {
    let catalog = match (track, stage) {
        (_, Stage::Closed) => return StageCatalog::Dormant,

        (Track::Administrative, Stage::Intake) => &ADMIN_INTAKE,
        (Track::Administrative, Stage::Evidence) => &ADMIN_EXAMINATION,
        (Track::Administrative, Stage::ClosingArguments | Stage::PreAppeal) => &ADMIN_OPINION,
        (Track::Administrative, Stage::Appeal | Stage::SupremeReview) => &ADMIN_REVIEW,
        (Track::Administrative, Stage::PostJudgment) => &ADMIN_PAYMENT,

        (Track::Dismissal, Stage::Intake) => &DISMISSAL_INTAKE,
        (Track::Dismissal, Stage::Evidence) => &DISMISSAL_EVIDENCE,

        (_, Stage::Intake) => &ORDINARY_INTAKE,
        (_, Stage::Evidence) => &ORDINARY_EVIDENCE,
        (_, Stage::ClosingArguments) => &ORDINARY_CLOSING,
        (_, Stage::PreAppeal) => &ORDINARY_PRE_APPEAL,
        (_, Stage::Appeal) => &ORDINARY_APPEAL,
        (_, Stage::SupremeReview) => &ORDINARY_SUPREME,
        (_, Stage::PostJudgment) => &ORDINARY_POST_JUDGMENT,
    };
    StageCatalog::Active(catalog)
}

/// Whether the raw status mentions an expert report.
pub fn status_mentions_expert_report(status: &str) -> bool {
    let s = status.to_lowercase();
    s.contains("peric") || s.contains("perit")
}

/// Look up display text for a tag across every catalog.
pub fn text_for_tag(tag: &str) -> Option<&'static str> {
    Track::all()
        .iter()
        .flat_map(|t| Stage::all().iter().map(move |s| catalog_for(*t, *s)))
        .filter_map(|c| match c {
            StageCatalog::Active(c) => Some(c),
            StageCatalog::Dormant => None,
        })
        .flat_map(|c| c.one_time.iter().chain(c.repeatable.iter()))
        .find(|i| i.tag == tag)
        .map(|i| i.text)
}
