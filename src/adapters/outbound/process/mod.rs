/// Process adapters for external command-line tools
mod command_runner;
mod library_inspector;

pub use command_runner::SystemCommandRunner;
pub use library_inspector::SystemLibraryInspector;
