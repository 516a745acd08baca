//! Panel declarations and the visibility engine.
//!
//! A panel is a tab or a sidebar section. Each declaration may carry two
//! independent predicates over the (possibly absent) record:
//!
//! - `visible` - is the panel rendered at all
//! - `enabled` - can the user interact with it
//!
//! An absent predicate is `true`. A visible but disabled panel is still
//! rendered. Evaluation never reorders or deduplicates declarations.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::warn;

/// Predicate over a record that may still be loading.
pub type Predicate<R> = fn(Option<&R>) -> bool;

/// Reference to a panel body implemented by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ComponentId(&'static str);

impl ComponentId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The visible/enabled predicate pair of one panel.
pub struct PanelDisplay<R> {
    pub visible: Option<Predicate<R>>,
    pub enabled: Option<Predicate<R>>,
}

impl<R> PanelDisplay<R> {
    /// Always visible, always enabled.
    pub fn always() -> Self {
        Self {
            visible: None,
            enabled: None,
        }
    }

    pub fn new(visible: Predicate<R>, enabled: Predicate<R>) -> Self {
        Self {
            visible: Some(visible),
            enabled: Some(enabled),
        }
    }

    pub fn visible_when(visible: Predicate<R>) -> Self {
        Self {
            visible: Some(visible),
            enabled: None,
        }
    }

    /// Visible once a record is loaded, enabled when `enabled` holds.
    pub fn data_gated(enabled: Predicate<R>) -> Self {
        Self {
            visible: Some(record_loaded::<R>),
            enabled: Some(enabled),
        }
    }
}

impl<R> Default for PanelDisplay<R> {
    fn default() -> Self {
        Self::always()
    }
}

impl<R> fmt::Debug for PanelDisplay<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelDisplay")
            .field("visible", &self.visible.is_some())
            .field("enabled", &self.enabled.is_some())
            .finish()
    }
}

/// `true` once any record is present.
pub fn record_loaded<R>(record: Option<&R>) -> bool {
    record.is_some()
}

/// Static description of one tab or sidebar section.
pub struct PanelDeclaration<R> {
    /// Tab name; sidebar sections are unnamed.
    pub name: Option<&'static str>,
    pub component: ComponentId,
    pub display: PanelDisplay<R>,
    /// Static configuration handed to the panel body.
    pub properties: Option<serde_json::Value>,
}

impl<R> PanelDeclaration<R> {
    pub fn tab(name: &'static str, component: ComponentId) -> Self {
        Self {
            name: Some(name),
            component,
            display: PanelDisplay::always(),
            properties: None,
        }
    }

    pub fn section(component: ComponentId) -> Self {
        Self {
            name: None,
            component,
            display: PanelDisplay::always(),
            properties: None,
        }
    }

    pub fn with_display(mut self, display: PanelDisplay<R>) -> Self {
        self.display = display;
        self
    }

    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Name for diagnostics: the tab name, else the component id.
    pub fn label(&self) -> &'static str {
        self.name.unwrap_or(self.component.as_str())
    }
}

impl<R> fmt::Debug for PanelDeclaration<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelDeclaration")
            .field("name", &self.name)
            .field("component", &self.component)
            .field("display", &self.display)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Result of evaluating one declaration against a record snapshot.
pub struct PanelState<'a, R> {
    pub declaration: &'a PanelDeclaration<R>,
    pub is_visible: bool,
    pub is_enabled: bool,
}

impl<R> fmt::Debug for PanelState<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelState")
            .field("panel", &self.declaration.label())
            .field("is_visible", &self.is_visible)
            .field("is_enabled", &self.is_enabled)
            .finish()
    }
}

/// Evaluate every declaration, in order, against `record`.
pub fn evaluate_panels<'a, R>(
    declarations: &'a [PanelDeclaration<R>],
    record: Option<&R>,
) -> Vec<PanelState<'a, R>> {
    declarations
        .iter()
        .map(|declaration| PanelState {
            declaration,
            is_visible: run_predicate(declaration.display.visible, record, declaration, "visible"),
            is_enabled: run_predicate(declaration.display.enabled, record, declaration, "enabled"),
        })
        .collect()
}

/// The rendered subset: visible panels only, declaration order preserved.
pub fn visible_panels<'a, R>(
    declarations: &'a [PanelDeclaration<R>],
    record: Option<&R>,
) -> Vec<PanelState<'a, R>> {
    evaluate_panels(declarations, record)
        .into_iter()
        .filter(|state| state.is_visible)
        .collect()
}

/// A panicking predicate resolves to `false` for its own axis only.
fn run_predicate<R>(
    predicate: Option<Predicate<R>>,
    record: Option<&R>,
    declaration: &PanelDeclaration<R>,
    axis: &'static str,
) -> bool {
    let Some(predicate) = predicate else {
        return true;
    };

    match panic::catch_unwind(AssertUnwindSafe(|| predicate(record))) {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(
                panel = declaration.label(),
                axis = axis,
                "Panel predicate panicked, treating as false"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct Counts {
        rows: Option<u64>,
    }

    const BODY: ComponentId = ComponentId::new("TestBody");

    fn has_rows(record: Option<&Counts>) -> bool {
        record.and_then(|r| r.rows).unwrap_or(0) > 0
    }

    fn explode(_: Option<&Counts>) -> bool {
        panic!("predicate bug")
    }

    fn summary(states: &[PanelState<'_, Counts>]) -> Vec<(&'static str, bool, bool)> {
        states
            .iter()
            .map(|s| (s.declaration.label(), s.is_visible, s.is_enabled))
            .collect()
    }

    #[test]
    fn test_missing_predicates_fail_open() {
        let decls = vec![PanelDeclaration::<Counts>::tab("Docs", BODY)];
        assert_eq!(
            summary(&evaluate_panels(&decls, None)),
            vec![("Docs", true, true)]
        );
    }

    #[test]
    fn test_disabled_panel_is_still_rendered() {
        let decls = vec![PanelDeclaration::tab("Rows", BODY)
            .with_display(PanelDisplay::new(|_| true, has_rows))];
        let record = Counts { rows: Some(0) };

        let rendered = visible_panels(&decls, Some(&record));
        assert_eq!(summary(&rendered), vec![("Rows", true, false)]);
    }

    #[test]
    fn test_invisible_panel_is_dropped() {
        let decls = vec![
            PanelDeclaration::tab("A", BODY),
            PanelDeclaration::tab("B", BODY).with_display(PanelDisplay::visible_when(has_rows)),
            PanelDeclaration::tab("C", BODY),
        ];
        let rendered = visible_panels(&decls, Some(&Counts { rows: None }));
        assert_eq!(
            rendered.iter().map(|s| s.declaration.label()).collect::<Vec<_>>(),
            vec!["A", "C"]
        );
    }

    #[test]
    fn test_data_gated_hidden_while_loading() {
        let decls = vec![PanelDeclaration::tab("Rows", BODY)
            .with_display(PanelDisplay::data_gated(has_rows))];
        assert_eq!(
            summary(&evaluate_panels(&decls, None)),
            vec![("Rows", false, false)]
        );

        let record = Counts { rows: Some(2) };
        assert_eq!(
            summary(&evaluate_panels(&decls, Some(&record))),
            vec![("Rows", true, true)]
        );
    }

    #[test]
    fn test_panicking_predicate_is_isolated() {
        let decls = vec![
            PanelDeclaration::tab("Broken", BODY)
                .with_display(PanelDisplay::new(|_| true, explode)),
            PanelDeclaration::tab("Fine", BODY),
        ];
        assert_eq!(
            summary(&evaluate_panels(&decls, None)),
            vec![("Broken", true, false), ("Fine", true, true)]
        );
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let decls = vec![
            PanelDeclaration::<Counts>::section(BODY),
            PanelDeclaration::section(ComponentId::new("Other")),
            PanelDeclaration::section(BODY),
        ];
        assert_eq!(
            summary(&evaluate_panels(&decls, None)),
            vec![
                ("TestBody", true, true),
                ("Other", true, true),
                ("TestBody", true, true)
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_undeclared_predicates_always_true(
            rows in proptest::option::of(any::<u64>()),
            present in any::<bool>(),
        ) {
            let decls = vec![PanelDeclaration::<Counts>::section(BODY)];
            let record = Counts { rows };
            let states = evaluate_panels(&decls, present.then_some(&record));
            prop_assert!(states[0].is_visible);
            prop_assert!(states[0].is_enabled);
        }

        #[test]
        fn prop_evaluation_is_deterministic(rows in proptest::option::of(0u64..5)) {
            let decls = vec![
                PanelDeclaration::tab("Rows", BODY)
                    .with_display(PanelDisplay::data_gated(has_rows)),
                PanelDeclaration::tab("Docs", BODY),
            ];
            let record = Counts { rows };
            let first = summary(&evaluate_panels(&decls, Some(&record)));
            let second = summary(&evaluate_panels(&decls, Some(&record)));
            prop_assert_eq!(first, second);
        }
    }
}
