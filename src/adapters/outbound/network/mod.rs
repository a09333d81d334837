/// Network adapters for external API calls
mod nvd_client;
mod tokio_sleeper;

pub use nvd_client::NvdClient;
pub use tokio_sleeper::TokioSleeper;
