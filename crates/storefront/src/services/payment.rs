use serde::Serialize;
use tracing::instrument;

use shopverse_core::{OrderId, Payment, PaymentMethod};

use crate::api::ApiClient;
use crate::error::Result;

#[derive(Serialize)]
struct PaymentRequest<'a> {
    order_id: &'a OrderId,
    payment_method: PaymentMethod,
}

/// `/payment` resource.
#[derive(Clone, Copy)]
pub struct PaymentService<'a> {
    api: &'a ApiClient,
}

impl<'a> PaymentService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /payment`. On success the backend marks the order paid.
    ///
    /// # Errors
    ///
    /// Returns the normalized API error.
    #[instrument(skip(self), fields(order_id = %order_id, method = %payment_method))]
    pub async fn process(
        &self,
        order_id: &OrderId,
        payment_method: PaymentMethod,
    ) -> Result<Payment> {
        let body = PaymentRequest {
            order_id,
            payment_method,
        };
        self.api.post(&["payment"], &body).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_body() {
        let order_id = OrderId::new("o1");
        let body = PaymentRequest {
            order_id: &order_id,
            payment_method: PaymentMethod::Card,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"order_id": "o1", "payment_method": "card"})
        );
    }
}
