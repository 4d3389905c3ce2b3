//! Errores del servicio de pedidos
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PancakeError {
    /// Argumento invalido independientemente del estado del pedido
    #[error("{0}")]
    DomainArgument(String),
    /// El estado actual del pedido no permite la operacion
    #[error("{0}")]
    InvalidState(String),
    /// Uso incorrecto de una API interna
    #[error("{0}")]
    Contract(String),
    #[error("Lock poisoned")]
    LockError,
}

impl<T> From<std::sync::PoisonError<T>> for PancakeError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        PancakeError::LockError
    }
}

impl PancakeError {
    pub fn is_domain_argument(&self) -> bool {
        matches!(self, PancakeError::DomainArgument(_))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, PancakeError::InvalidState(_))
    }
}
