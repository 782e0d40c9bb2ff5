use indexmap::IndexMap;

use crate::core::LinkKind;

/// Read-only `{code, name}` registry for the objects blocks can be linked to.
///
/// Lookups are for display only; a block may reference a code the source does
/// not know.
pub trait LabelSource {
    fn name_for(&self, kind: LinkKind, code: &str) -> Option<&str>;

    /// Every known `(code, name)` pair of one kind, for pickers.
    fn entries(&self, kind: LinkKind) -> Vec<(&str, &str)>;
}

/// In-memory label source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLabelRegistry {
    engines: IndexMap<String, String>,
    projects: IndexMap<String, String>,
}

impl StaticLabelRegistry {
    #[must_use]
    pub fn with_engine(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.engines.insert(code.into(), name.into());
        self
    }

    #[must_use]
    pub fn with_project(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.projects.insert(code.into(), name.into());
        self
    }

    fn table(&self, kind: LinkKind) -> Option<&IndexMap<String, String>> {
        match kind {
            LinkKind::Engine => Some(&self.engines),
            LinkKind::Project => Some(&self.projects),
            LinkKind::None => None,
        }
    }
}

impl LabelSource for StaticLabelRegistry {
    fn name_for(&self, kind: LinkKind, code: &str) -> Option<&str> {
        self.table(kind)?.get(code).map(String::as_str)
    }

    fn entries(&self, kind: LinkKind) -> Vec<(&str, &str)> {
        self.table(kind)
            .map(|table| {
                table
                    .iter()
                    .map(|(code, name)| (code.as_str(), name.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Badge text for a linked block: `[CODE] name` for engines, `(PROJ) name`
/// for projects, the raw code when the source has no entry.
#[must_use]
pub fn entity_label(source: &dyn LabelSource, kind: LinkKind, code: &str) -> Option<String> {
    let name = source.name_for(kind, code);
    match (kind, name) {
        (LinkKind::None, _) => None,
        (LinkKind::Engine, Some(name)) => Some(format!("[{code}] {name}")),
        (LinkKind::Project, Some(name)) => Some(format!("(PROJ) {name}")),
        (_, None) => Some(code.to_owned()),
    }
}
