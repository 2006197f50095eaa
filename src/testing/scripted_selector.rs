use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::Selector;

/// `Selector` returning a fixed answer and remembering what it was shown.
#[derive(Default)]
pub struct ScriptedSelector {
    answer: Option<Vec<usize>>,
    pub shown: Mutex<Vec<String>>,
}

impl ScriptedSelector {
    /// Picks `indices` on every prompt.
    pub fn picking(indices: &[usize]) -> Self {
        Self { answer: Some(indices.to_vec()), shown: Mutex::new(Vec::new()) }
    }

    /// Cancels every prompt.
    pub fn cancelling() -> Self {
        Self::default()
    }
}

impl Selector for ScriptedSelector {
    fn select_many(&self, _prompt: &str, items: &[String]) -> Result<Option<Vec<usize>>, AppError> {
        self.shown.lock().unwrap().extend(items.iter().cloned());
        Ok(self.answer.clone())
    }
}
