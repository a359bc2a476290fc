//! Static application shell: title, sidebar and bottom tab bar.

use serde::Serialize;
use ts_rs::TS;

pub const APP_TITLE: &str = "Elecciones Municipales 2026";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NavEntry {
    pub label: &'static str,
    pub icon: &'static str,
    pub route: &'static str,
    /// Rendered as the raised centre button on the mobile tab bar.
    pub destacado: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Shell {
    pub titulo: &'static str,
    pub sidebar: Vec<NavEntry>,
    pub tabs: Vec<NavEntry>,
}

const RESULTADOS: NavEntry = NavEntry {
    label: "Resultados",
    icon: "📊",
    route: "/",
    destacado: false,
};

const DIGITACION: NavEntry = NavEntry {
    label: "Digitación",
    icon: "✍️",
    route: "/digitacion",
    destacado: false,
};

const SUBIR_ACTA: NavEntry = NavEntry {
    label: "Subir Acta",
    icon: "📷",
    route: "/upload",
    destacado: true,
};

/// The shell every page renders inside.
pub fn shell() -> Shell {
    Shell {
        titulo: APP_TITLE,
        sidebar: vec![RESULTADOS, DIGITACION, SUBIR_ACTA],
        tabs: vec![RESULTADOS, SUBIR_ACTA, DIGITACION],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_lists_every_page_once() {
        let s = shell();
        assert_eq!(s.sidebar.len(), 3);
        let mut routes: Vec<_> = s.tabs.iter().map(|e| e.route).collect();
        routes.sort_unstable();
        assert_eq!(routes, vec!["/", "/digitacion", "/upload"]);
    }

    #[test]
    fn upload_is_the_highlighted_tab() {
        let highlighted: Vec<_> = shell().tabs.into_iter().filter(|e| e.destacado).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].label, "Subir Acta");
    }
}
