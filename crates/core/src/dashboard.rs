//! Presentation helpers for the results dashboards.
//!
//! Aggregation happens in the data service's statistics procedures. This
//! module only coerces, labels and sizes the rows it gets back, and keeps the
//! aggregate/district drill-down state.

use serde::Serialize;
use ts_rs::TS;

use crate::types::DbId;

/// Labels longer than this are cut and suffixed with an ellipsis.
pub const MAX_LABEL_CHARS: usize = 18;

/// Headroom added past the largest bar so value labels fit.
pub const AXIS_HEADROOM: f64 = 0.15;

/// Minimum chart height in pixels.
pub const MIN_CHART_HEIGHT: u32 = 400;

/// Height allotted per bar in pixels.
pub const ROW_HEIGHT: u32 = 45;

/// Approximate rendered width of one label character in pixels.
const LABEL_CHAR_WIDTH: f64 = 7.0;

/// Padding a label needs to sit inside its bar.
const LABEL_PADDING: f64 = 20.0;

// ---------------------------------------------------------------------------
// Drill-down state
// ---------------------------------------------------------------------------

/// Which distribution the dashboard shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "vista", rename_all = "snake_case")]
#[ts(export)]
pub enum DashboardView {
    /// One bar per district.
    #[default]
    Districts,
    /// One bar per venue of the selected district.
    District { distrito_id: DbId },
}

impl DashboardView {
    pub fn from_query(distrito_id: Option<DbId>) -> Self {
        match distrito_id {
            Some(distrito_id) => Self::District { distrito_id },
            None => Self::Districts,
        }
    }

    pub fn select_district(self, distrito_id: DbId) -> Self {
        Self::District { distrito_id }
    }

    pub fn back(self) -> Self {
        Self::Districts
    }

    pub fn distrito_id(self) -> Option<DbId> {
        match self {
            Self::Districts => None,
            Self::District { distrito_id } => Some(distrito_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Compact district label: `"DISTRITO 4"` becomes `"D4"`.
pub fn short_label(nombre: &str) -> String {
    nombre.replace("DISTRITO ", "D")
}

/// Cut `text` to `max_chars` characters, appending `…` when it was longer.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

/// Group digits in thousands with commas (`12345` → `"12,345"`).
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

/// An aggregate row as returned by a statistics procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub id: DbId,
    pub nombre: String,
    /// Percentage share (0..=100).
    pub porcentaje: f64,
    /// Absolute figure the share is computed from.
    pub total: i64,
}

/// One bar ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ChartBar {
    pub id: DbId,
    pub nombre: String,
    pub etiqueta: String,
    pub porcentaje: f64,
    pub total: i64,
    /// Bar length as a fraction of the axis (0..=1).
    pub fraccion: f64,
    /// Value label, e.g. `"12.50% (1,234)"`.
    pub texto: String,
}

impl ChartBar {
    /// Whether the value label fits inside a bar rendered `bar_px` wide.
    pub fn label_fits_inside(&self, bar_px: f64) -> bool {
        bar_px > self.texto.chars().count() as f64 * LABEL_CHAR_WIDTH + LABEL_PADDING
    }
}

/// A whole bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct BarChart {
    pub titulo: String,
    pub vista: DashboardView,
    /// Caption of the headline figure.
    pub total_etiqueta: String,
    pub total: i64,
    /// Upper end of the value axis.
    pub eje_max: f64,
    pub alto_px: u32,
    pub barras: Vec<ChartBar>,
}

/// Upper end of the value axis: the largest value plus headroom.
pub fn axis_max(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    max + max * AXIS_HEADROOM
}

/// Pixel height for a chart with `rows` bars.
pub fn chart_height(rows: usize) -> u32 {
    let rows = u32::try_from(rows).unwrap_or(u32::MAX);
    MIN_CHART_HEIGHT.max(rows.saturating_mul(ROW_HEIGHT))
}

/// Sum of the absolute figures of already-aggregated rows.
pub fn sum_totals(rows: &[AggregateRow]) -> i64 {
    rows.iter().map(|r| r.total).sum()
}

/// Build the bars for `rows`, sized against a shared axis.
///
/// In the district view venue names are truncated; in the aggregate view
/// district names are shortened.
pub fn build_bars(rows: &[AggregateRow], view: DashboardView) -> Vec<ChartBar> {
    let axis = axis_max(rows.iter().map(|r| r.porcentaje));

    rows.iter()
        .map(|r| {
            let porcentaje = if r.porcentaje.is_finite() { r.porcentaje } else { 0.0 };
            let etiqueta = match view {
                DashboardView::Districts => short_label(&r.nombre),
                DashboardView::District { .. } => truncate_label(&r.nombre, MAX_LABEL_CHARS),
            };
            ChartBar {
                id: r.id,
                nombre: r.nombre.clone(),
                etiqueta,
                porcentaje,
                total: r.total,
                fraccion: if axis > 0.0 { porcentaje / axis } else { 0.0 },
                texto: format!("{porcentaje:.2}% ({})", format_thousands(r.total)),
            }
        })
        .collect()
}

/// Assemble the distribution chart.
///
/// `districts` are always the district-level rows; `rows` are what is being
/// drawn (the same district rows, or one district's venues). The headline
/// total is the sum of the drawn rows in the aggregate view and the selected
/// district's own total when drilled down.
pub fn distribution_chart(
    view: DashboardView,
    districts: &[AggregateRow],
    rows: &[AggregateRow],
) -> BarChart {
    let (titulo, total_etiqueta, total) = match view {
        DashboardView::Districts => (
            "Distribución por Distrito".to_string(),
            "Total General".to_string(),
            sum_totals(rows),
        ),
        DashboardView::District { distrito_id } => {
            let current = districts.iter().find(|d| d.id == distrito_id);
            (
                format!(
                    "Distribución {}",
                    current.map(|d| d.nombre.as_str()).unwrap_or_default()
                ),
                "Total Distrito".to_string(),
                current.map(|d| d.total).unwrap_or(0),
            )
        }
    };

    BarChart {
        titulo,
        vista: view,
        total_etiqueta,
        total,
        eje_max: axis_max(rows.iter().map(|r| r.porcentaje)),
        alto_px: chart_height(rows.len()),
        barras: build_bars(rows, view),
    }
}

/// Assemble the party vote chart.
///
/// `rows` are party vote rows in ballot order, labelled by party code.
/// `distrito` names the selected district in the drilled-down view.
pub fn party_chart(view: DashboardView, distrito: Option<&str>, rows: &[AggregateRow]) -> BarChart {
    let titulo = match (view, distrito) {
        (DashboardView::District { .. }, Some(nombre)) => format!("Votos por Partido {nombre}"),
        _ => "Votos por Partido".to_string(),
    };

    BarChart {
        titulo,
        vista: view,
        total_etiqueta: "Votos Válidos".to_string(),
        total: sum_totals(rows),
        eje_max: axis_max(rows.iter().map(|r| r.porcentaje)),
        alto_px: chart_height(rows.len()),
        barras: build_bars(rows, view),
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress of tables computed versus total tables.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Progress {
    pub mesas_total: i64,
    pub mesas_computadas: i64,
    pub porcentaje: f64,
    pub texto: String,
}

impl Progress {
    /// Wrap the figures returned by the progress procedure.
    pub fn new(mesas_total: i64, mesas_computadas: i64, porcentaje: f64) -> Self {
        let porcentaje = if porcentaje.is_finite() { porcentaje } else { 0.0 };
        Self {
            mesas_total,
            mesas_computadas,
            porcentaje,
            texto: format!(
                "{} de {} mesas computadas ({porcentaje:.2}%)",
                format_thousands(mesas_computadas),
                format_thousands(mesas_total)
            ),
        }
    }
}
