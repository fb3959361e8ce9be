use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::snapshot::SnapshotError;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

impl From<PanelError> for String {
    fn from(err: PanelError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_into_string() {
        let err = PanelError::Catalog("unknown template 'sauna'".to_string());
        let msg: String = err.into();
        assert_eq!(msg, "Catalog error: unknown template 'sauna'");
    }

    #[test]
    fn test_snapshot_error_converts() {
        let err: PanelError = SnapshotError::UnsupportedVersion(7).into();
        assert_eq!(err.to_string(), "Snapshot error: unsupported snapshot version 7");
    }

    #[test]
    fn test_checkout_error_converts() {
        let err: PanelError = CheckoutError::NothingToCheckout.into();
        assert!(err.to_string().starts_with("Checkout error:"));
    }
}
