mod selector;
mod source_control;

pub use selector::Selector;
pub use source_control::SourceControl;
