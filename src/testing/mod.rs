mod fake_source_control;
mod scripted_selector;
mod test_project;

pub use fake_source_control::FakeSourceControl;
pub use scripted_selector::ScriptedSelector;
pub use test_project::TestProject;
