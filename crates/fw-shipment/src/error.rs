// error.rs - Error types for the shipment model.

use thiserror::Error;

/// Errors raised while validating shipment model configuration.
#[derive(Debug, Error)]
pub enum ShipmentError {
    /// The status rule list cannot classify a required phase.
    #[error("status rules have no keywords for phase '{phase}'")]
    MissingPhase { phase: String },

    /// A rule carries an empty keyword (it would match every status).
    #[error("status rule for phase '{phase}' contains an empty keyword")]
    EmptyKeyword { phase: String },
}
