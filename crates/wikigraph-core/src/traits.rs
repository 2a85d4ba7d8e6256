//! Core traits for Wikigraph front ends.
//!
//! The graph engine itself is configuration-free; front ends (the CLI, an
//! HTTP layer) implement [`ConfigProvider`] so shared handler code can find
//! the graph document to load.

use std::path::PathBuf;

use crate::Result;

/// Trait for front-end configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use wikigraph_core::traits::ConfigProvider;
/// use wikigraph_core::Result;
///
/// #[derive(Clone)]
/// struct CourseConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for CourseConfig {
///     fn project_name(&self) -> &str {
///         "wiki-course"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.clone())
///     }
/// }
///
/// let config = CourseConfig { data_dir: PathBuf::from("/data") };
/// assert_eq!(
///     config.graph_path().unwrap(),
///     PathBuf::from("/data/data/graphs/graph.json")
/// );
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path of the graph document to load.
    ///
    /// Defaults to `<base>/data/graphs/graph.json`.
    fn graph_path(&self) -> Result<PathBuf> {
        Ok(self.base_path()?.join("data").join("graphs").join("graph.json"))
    }
}
