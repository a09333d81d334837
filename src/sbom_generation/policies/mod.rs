mod retry_policy;

pub use retry_policy::RetryPolicy;
