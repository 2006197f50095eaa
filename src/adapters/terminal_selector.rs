use dialoguer::MultiSelect;

use crate::domain::AppError;
use crate::ports::Selector;

/// Interactive `Selector` rendered on the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalSelector;

impl TerminalSelector {
    pub fn new() -> Self {
        Self
    }
}

impl Selector for TerminalSelector {
    fn select_many(&self, prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>, AppError> {
        if items.is_empty() {
            return Ok(Some(Vec::new()));
        }

        MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .interact_opt()
            .map_err(|err| AppError::Selection(err.to_string()))
    }
}
