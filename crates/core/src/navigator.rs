//! Digitization navigator: district summary, global table search and the
//! per-district table list.
//!
//! All three views derive from one flat list of [`TableRecord`]s (one per
//! polling table, joined with its venue and district and flagged with whether
//! it has a totals row or a photo).

use serde::Serialize;
use ts_rs::TS;

use crate::text::{first_number, fold, folded_contains};
use crate::types::DbId;

/// One polling table with the context every navigator view needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRecord {
    pub mesa_id: DbId,
    pub numero_mesa: i32,
    pub es_prioridad: bool,
    /// Status is `registrado`.
    pub registrada: bool,
    /// A totals row exists.
    pub digitada: bool,
    /// At least one acta photo exists.
    pub con_foto: bool,
    pub recinto_id: DbId,
    pub recinto_nombre: String,
    pub distrito_id: DbId,
    pub distrito_nombre: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictRecord {
    pub id: DbId,
    pub nombre: String,
}

// ---------------------------------------------------------------------------
// District summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DistrictSummary {
    pub id: DbId,
    pub nombre: String,
    pub total_mesas: u32,
    pub digitadas: u32,
    pub con_foto: u32,
    pub pendientes: u32,
    /// Rounded share of digitized tables, 0 for a district with no tables.
    pub porcentaje: u32,
}

/// Sort key for districts: the first number in the name, 0 when absent.
pub fn district_number(nombre: &str) -> u64 {
    first_number(nombre).unwrap_or(0)
}

/// Completion counters for every district, ordered by district number.
///
/// Districts without tables are kept with zero counters. The sort is stable,
/// so districts sharing a number keep their input order.
pub fn summarize_districts(
    districts: &[DistrictRecord],
    tables: &[TableRecord],
) -> Vec<DistrictSummary> {
    let mut summaries: Vec<DistrictSummary> = districts
        .iter()
        .map(|d| {
            let mut total = 0u32;
            let mut digitadas = 0u32;
            let mut con_foto = 0u32;
            for t in tables.iter().filter(|t| t.distrito_id == d.id) {
                total += 1;
                if t.digitada {
                    digitadas += 1;
                }
                if t.con_foto {
                    con_foto += 1;
                }
            }

            DistrictSummary {
                id: d.id,
                nombre: d.nombre.clone(),
                total_mesas: total,
                digitadas,
                con_foto,
                pendientes: total - digitadas,
                porcentaje: percent_rounded(digitadas, total),
            }
        })
        .collect();

    summaries.sort_by_key(|s| district_number(&s.nombre));
    summaries
}

fn percent_rounded(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}

// ---------------------------------------------------------------------------
// Global search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SearchHit {
    pub mesa_id: DbId,
    pub numero_mesa: i32,
}

/// Search hits of one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct VenueGroup {
    pub recinto_id: DbId,
    pub recinto_nombre: String,
    pub distrito_nombre: String,
    pub mesas: Vec<SearchHit>,
}

/// Outcome of a global table search.
///
/// `NoQuery` (nothing typed) is distinct from `Results` with no groups
/// (something typed, nothing found).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", content = "grupos", rename_all = "snake_case")]
#[ts(export)]
pub enum SearchOutcome {
    NoQuery,
    Results(Vec<VenueGroup>),
}

impl SearchOutcome {
    pub fn hit_count(&self) -> usize {
        match self {
            Self::NoQuery => 0,
            Self::Results(groups) => groups.iter().map(|g| g.mesas.len()).sum(),
        }
    }
}

/// Search every table by number or venue name.
///
/// A table matches when its number as text contains the query, or its venue
/// name contains it case-insensitively. Hits are grouped by venue in
/// first-appearance order.
pub fn search_tables(tables: &[TableRecord], query: &str) -> SearchOutcome {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return SearchOutcome::NoQuery;
    }

    let mut groups: Vec<VenueGroup> = Vec::new();
    for t in tables {
        let matches = t.numero_mesa.to_string().contains(&term)
            || t.recinto_nombre.to_lowercase().contains(&term);
        if !matches {
            continue;
        }

        let hit = SearchHit {
            mesa_id: t.mesa_id,
            numero_mesa: t.numero_mesa,
        };
        match groups.iter_mut().find(|g| g.recinto_id == t.recinto_id) {
            Some(group) => group.mesas.push(hit),
            None => groups.push(VenueGroup {
                recinto_id: t.recinto_id,
                recinto_nombre: t.recinto_nombre.clone(),
                distrito_nombre: t.distrito_nombre.clone(),
                mesas: vec![hit],
            }),
        }
    }

    SearchOutcome::Results(groups)
}

// ---------------------------------------------------------------------------
// District detail
// ---------------------------------------------------------------------------

/// A table card in a district or venue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TableEntry {
    pub mesa_id: DbId,
    pub numero_mesa: i32,
    pub recinto_nombre: String,
    pub es_prioridad: bool,
    pub registrada: bool,
    /// Registered tables are listed but cannot be opened.
    pub navegable: bool,
}

impl From<&TableRecord> for TableEntry {
    fn from(t: &TableRecord) -> Self {
        Self {
            mesa_id: t.mesa_id,
            numero_mesa: t.numero_mesa,
            recinto_nombre: t.recinto_nombre.clone(),
            es_prioridad: t.es_prioridad,
            registrada: t.registrada,
            navegable: !t.registrada,
        }
    }
}

/// Priority tables first, then ascending table number.
pub fn order_tables(entries: &mut [TableEntry]) {
    entries.sort_by(|a, b| {
        b.es_prioridad
            .cmp(&a.es_prioridad)
            .then(a.numero_mesa.cmp(&b.numero_mesa))
    });
}

/// Tables of one district, ordered and filtered.
///
/// The filter is an accent-insensitive substring over venue name or table
/// number; a blank filter keeps everything.
pub fn district_tables(tables: &[TableRecord], distrito_id: DbId, filter: &str) -> Vec<TableEntry> {
    let term = fold(filter.trim());

    let mut entries: Vec<TableEntry> = tables
        .iter()
        .filter(|t| t.distrito_id == distrito_id)
        .filter(|t| {
            term.is_empty()
                || folded_contains(&t.recinto_nombre, &term)
                || t.numero_mesa.to_string().contains(&term)
        })
        .map(TableEntry::from)
        .collect();

    order_tables(&mut entries);
    entries
}

/// Tables of one venue, priority first then by number.
pub fn venue_tables(tables: &[TableRecord], recinto_id: DbId) -> Vec<TableEntry> {
    let mut entries: Vec<TableEntry> = tables
        .iter()
        .filter(|t| t.recinto_id == recinto_id)
        .map(TableEntry::from)
        .collect();
    order_tables(&mut entries);
    entries
}

/// Open a table from a list. Registered tables are a no-op.
pub fn select_table(entry: &TableEntry) -> Option<DbId> {
    entry.navegable.then_some(entry.mesa_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(id: DbId, nombre: &str) -> DistrictRecord {
        DistrictRecord {
            id,
            nombre: nombre.to_string(),
        }
    }

    fn table(mesa_id: DbId, numero: i32, recinto: (DbId, &str), distrito: (DbId, &str)) -> TableRecord {
        TableRecord {
            mesa_id,
            numero_mesa: numero,
            es_prioridad: false,
            registrada: false,
            digitada: false,
            con_foto: false,
            recinto_id: recinto.0,
            recinto_nombre: recinto.1.to_string(),
            distrito_id: distrito.0,
            distrito_nombre: distrito.1.to_string(),
        }
    }

    // -- district summary --

    #[test]
    fn districts_sort_by_embedded_number() {
        let districts = vec![
            district(1, "DISTRITO 10"),
            district(2, "DISTRITO 2"),
            district(3, "RURAL"),
            district(4, "DISTRITO 1"),
        ];
        let names: Vec<String> = summarize_districts(&districts, &[])
            .into_iter()
            .map(|s| s.nombre)
            .collect();
        assert_eq!(names, vec!["RURAL", "DISTRITO 1", "DISTRITO 2", "DISTRITO 10"]);
    }

    #[test]
    fn district_sort_is_stable_for_equal_numbers() {
        let districts = vec![district(1, "B 3"), district(2, "A 3")];
        let ids: Vec<DbId> = summarize_districts(&districts, &[])
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn summary_counts_digitized_photos_and_pending() {
        let d = (1, "DISTRITO 1");
        let mut a = table(1, 1, (10, "Escuela A"), d);
        a.digitada = true;
        a.con_foto = true;
        let mut b = table(2, 2, (10, "Escuela A"), d);
        b.con_foto = true;
        let c = table(3, 3, (11, "Escuela B"), d);
        let other = table(4, 1, (12, "Colegio"), (2, "DISTRITO 2"));

        let summary = summarize_districts(&[district(1, "DISTRITO 1")], &[a, b, c, other]);
        let s = &summary[0];
        assert_eq!(s.total_mesas, 3);
        assert_eq!(s.digitadas, 1);
        assert_eq!(s.con_foto, 2);
        assert_eq!(s.pendientes, 2);
        assert_eq!(s.porcentaje, 33);
    }

    #[test]
    fn empty_district_has_zero_progress() {
        let summary = summarize_districts(&[district(5, "DISTRITO 5")], &[]);
        assert_eq!(summary[0].total_mesas, 0);
        assert_eq!(summary[0].porcentaje, 0);
    }

    // -- search --

    fn search_fixture() -> Vec<TableRecord> {
        vec![
            table(1, 12, (10, "Escuela Central"), (1, "DISTRITO 1")),
            table(2, 3, (10, "Escuela Central"), (1, "DISTRITO 1")),
            table(3, 120, (11, "Colegio Norte"), (2, "DISTRITO 2")),
        ]
    }

    #[test]
    fn empty_query_is_no_query() {
        assert_eq!(search_tables(&search_fixture(), ""), SearchOutcome::NoQuery);
        assert_eq!(search_tables(&search_fixture(), "   "), SearchOutcome::NoQuery);
    }

    #[test]
    fn query_without_hits_is_empty_results() {
        let outcome = search_tables(&search_fixture(), "hospital");
        assert_eq!(outcome, SearchOutcome::Results(vec![]));
        assert_ne!(outcome, SearchOutcome::NoQuery);
        assert_eq!(outcome.hit_count(), 0);
    }

    #[test]
    fn number_query_matches_substring_and_groups_by_venue() {
        let SearchOutcome::Results(groups) = search_tables(&search_fixture(), "12") else {
            panic!("expected results");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].recinto_nombre, "Escuela Central");
        assert_eq!(groups[0].mesas, vec![SearchHit { mesa_id: 1, numero_mesa: 12 }]);
        assert_eq!(groups[1].distrito_nombre, "DISTRITO 2");
    }

    #[test]
    fn venue_query_is_case_insensitive() {
        let outcome = search_tables(&search_fixture(), "ESCUELA");
        let SearchOutcome::Results(groups) = &outcome else {
            panic!("expected results");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].mesas.len(), 2);
        assert_eq!(outcome.hit_count(), 2);
    }

    // -- district detail --

    #[test]
    fn priority_tables_first_then_by_number() {
        let d = (1, "DISTRITO 1");
        let mut t1 = table(1, 5, (10, "A"), d);
        let t2 = table(2, 1, (10, "A"), d);
        let mut t3 = table(3, 2, (11, "B"), d);
        let t4 = table(4, 3, (11, "B"), d);
        t1.es_prioridad = true;
        t3.es_prioridad = true;

        let numbers: Vec<i32> = district_tables(&[t1, t2, t3, t4], 1, "")
            .iter()
            .map(|e| e.numero_mesa)
            .collect();
        assert_eq!(numbers, vec![2, 5, 1, 3]);
    }

    #[test]
    fn district_filter_ignores_accents_both_ways() {
        let d = (1, "DISTRITO 1");
        let tables = vec![
            table(1, 1, (10, "Recintó Ferial"), d),
            table(2, 2, (11, "Recinto Sur"), d),
            table(3, 3, (12, "Colegio"), d),
        ];

        assert_eq!(district_tables(&tables, 1, "recinto").len(), 2);
        assert_eq!(district_tables(&tables, 1, "RECINTÓ").len(), 2);
        assert_eq!(district_tables(&tables, 1, "3").len(), 1);
        assert_eq!(district_tables(&tables, 2, "").len(), 0);
    }

    #[test]
    fn registered_tables_are_listed_but_not_selectable() {
        let mut t = table(1, 1, (10, "A"), (1, "DISTRITO 1"));
        t.registrada = true;
        let open = table(2, 2, (10, "A"), (1, "DISTRITO 1"));

        let entries = district_tables(&[t, open], 1, "");
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].navegable);
        assert_eq!(select_table(&entries[0]), None);
        assert_eq!(select_table(&entries[1]), Some(2));
    }

    #[test]
    fn venue_tables_only_include_the_venue() {
        let d = (1, "DISTRITO 1");
        let tables = vec![
            table(1, 2, (10, "A"), d),
            table(2, 1, (10, "A"), d),
            table(3, 1, (11, "B"), d),
        ];
        let numbers: Vec<i32> = venue_tables(&tables, 10).iter().map(|e| e.numero_mesa).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
