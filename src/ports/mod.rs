/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven ports exist: the CLI calls use cases directly, and the
/// use cases reach the file system, external tools, the vulnerability
/// database and the console through the traits in `outbound`.
pub mod outbound;
