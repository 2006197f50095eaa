use crate::domain::AppError;

/// Port for interactive list selection.
pub trait Selector {
    /// Let the user pick any number of `items`.
    ///
    /// Returns the chosen indices, or `None` when the user cancels.
    fn select_many(&self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>, AppError>;
}
