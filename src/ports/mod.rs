/// Ports module defining interfaces for hexagonal architecture
///
/// The CLI drives the use cases directly, so only outbound ports
/// (driven ports - infrastructure interfaces) are defined.
pub mod outbound;
