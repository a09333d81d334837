/// Application layer - Use cases, pipelines and DTOs
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod dto;
pub mod pipeline;
pub mod use_cases;
