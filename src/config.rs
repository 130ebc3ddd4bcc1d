use serde::Deserialize;

/// Tunables for graph construction and layout.
///
/// Field names deserialize from the camelCase keys used by diagram config
/// files; every field has a default so a partial (or empty) config works.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitGraphConfig {
    /// Name of the seeded initial branch
    pub main_branch_name: String,
    /// Explicit sort key of the seeded branch
    pub main_branch_order: f64,
    /// Place commits at the depth of their latest parent instead of on a
    /// single global cursor, so concurrent branches line up
    pub parallel_commits: bool,
    /// Rotated commit labels need wider lanes
    pub rotate_commit_label: bool,
    /// Whether a renderer will draw commit id labels
    pub show_commit_label: bool,
    /// Whether a renderer will draw branch lane lines; lane coordinates are
    /// reserved against edge bends only when it does
    pub show_branches: bool,
}

impl Default for GitGraphConfig {
    fn default() -> Self {
        Self {
            main_branch_name: "main".to_string(),
            main_branch_order: 0.0,
            parallel_commits: false,
            rotate_commit_label: true,
            show_commit_label: true,
            show_branches: true,
        }
    }
}
