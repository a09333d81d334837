/// Mock implementations for testing
mod mock_command_runner;
mod mock_cve_repository;
mod mock_output_presenter;
mod mock_progress_reporter;
mod recording_sleeper;

pub use mock_command_runner::MockCommandRunner;
pub use mock_cve_repository::{nvd_item, MockCveRepository};
pub use mock_output_presenter::MockOutputPresenter;
pub use mock_progress_reporter::MockProgressReporter;
pub use recording_sleeper::RecordingSleeper;
