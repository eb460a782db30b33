//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_ignored| {
            error!(
                r#type = std::any::type_name::<T>(),
                "depot is missing injected state"
            );

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_state_is_a_server_error() {
        let depot = Depot::new();

        let result = depot.obtain_or_500::<Arc<String>>();

        assert!(
            matches!(result, Err(ref status) if status.code == StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn injected_state_is_returned() {
        let mut depot = Depot::new();
        depot.inject(Arc::new("state".to_string()));

        let result = depot.obtain_or_500::<Arc<String>>().map(|state| state.as_str());

        assert!(matches!(result, Ok("state")));
    }
}
