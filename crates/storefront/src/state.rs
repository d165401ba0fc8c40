//! The storefront context handed to every view.
//!
//! [`Storefront`] owns the API client and the session store, so views never
//! touch storage or HTTP directly. It is cheaply cloneable via `Arc`.

use std::sync::Arc;

use secrecy::SecretString;

use shopverse_core::forms::{LoginForm, ProductForm, Registration, ShippingForm};
use shopverse_core::{
    Cart, InventorySummary, Order, Payment, PaymentMethod, Product, ProductId, Session,
};

use crate::api::{ApiClient, MessageResponse};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::session::{FileStorage, SessionStorage, SessionStore};

/// Message for non-admins attempting admin operations.
pub const ADMIN_REQUIRED_MESSAGE: &str = "Admin access required";

/// Message for checking out an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub payment: Payment,
}

/// Storefront context shared by all views.
pub struct Storefront<S = FileStorage> {
    inner: Arc<StorefrontInner<S>>,
}

struct StorefrontInner<S> {
    api: ApiClient,
    session: SessionStore<S>,
}

impl<S> Clone for Storefront<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Storefront<FileStorage> {
    /// Build the context from configuration, keeping the session on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let session = SessionStore::new(FileStorage::new(&config.session_dir));
        Ok(Self::new(api, session))
    }
}

impl<S: SessionStorage> Storefront<S> {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionStore<S>) -> Self {
        Self {
            inner: Arc::new(StorefrontInner { api, session }),
        }
    }

    /// Get a reference to the API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore<S> {
        &self.inner.session
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Validate the form, log in and store the returned session.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the API error.
    pub async fn login(&self, form: &LoginForm) -> Result<Session> {
        let credentials = form.validate()?;
        let password = SecretString::from(credentials.password);
        let session = self
            .api()
            .auth()
            .login(&credentials.email, &password)
            .await?;

        self.session().save_session(&session);
        set_sentry_user(&session.id, Some(session.email.as_str()));
        tracing::info!(user_id = %session.id, admin = session.is_admin(), "Logged in");
        Ok(session)
    }

    /// Create an account from a validated registration. The user is not
    /// logged in afterwards.
    ///
    /// Validation is left to the caller so it can ask for confirmation
    /// when [`Registration::needs_confirmation`] is set.
    ///
    /// # Errors
    ///
    /// Returns the API error, e.g. "Email already registered".
    pub async fn register(&self, registration: &Registration) -> Result<Session> {
        let user = self.api().auth().register(registration).await?;
        tracing::info!(user_id = %user.id, "Registered");
        Ok(user)
    }

    /// Forget the session and cached cart.
    pub fn logout(&self) {
        self.session().clear_session();
        clear_sentry_user();
        tracing::info!("Logged out");
    }

    /// The logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` when logged out.
    pub fn require_user(&self) -> Result<Session> {
        self.session().get_session().ok_or(AppError::Session)
    }

    /// The logged-in admin.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` when logged out, and a validation error
    /// when the user is not an admin.
    pub fn require_admin(&self) -> Result<Session> {
        let session = self.require_user()?;
        if !session.is_admin() {
            return Err(AppError::Validation(ADMIN_REQUIRED_MESSAGE.to_string()));
        }
        Ok(session)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// All products. Browsing needs no login.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn products(&self) -> Result<Vec<Product>> {
        self.api().products().list().await
    }

    /// One product.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn product(&self, id: &ProductId) -> Result<Product> {
        self.api().products().get(id).await
    }

    // =========================================================================
    // Cart and orders
    // =========================================================================

    /// The logged-in user's cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` when logged out, or the API error.
    pub async fn cart(&self) -> Result<Cart> {
        let user = self.require_user()?;
        self.api().cart().get(&user.id).await
    }

    /// Add `quantity` of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` when logged out, a validation error for a
    /// zero quantity, or the API error.
    pub async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<Cart> {
        let user = self.require_user()?;
        if quantity == 0 {
            return Err(AppError::Validation(
                "Quantity must be greater than 0".to_string(),
            ));
        }
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        self.api().cart().add(&user.id, product_id, quantity).await
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` when logged out, or the API error.
    pub async fn remove_from_cart(&self, product_id: &ProductId) -> Result<()> {
        let user = self.require_user()?;
        self.api().cart().remove(&user.id, product_id).await
    }

    /// The logged-in user's orders.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` when logged out, or the API error.
    pub async fn orders(&self) -> Result<Vec<Order>> {
        let user = self.require_user()?;
        self.api().orders().list_for_user(&user.id).await
    }

    /// Place an order for the whole cart and pay for it.
    ///
    /// Shipping details are validated first and the cart is re-fetched, so
    /// nothing is sent to the order endpoints for invalid input or an empty
    /// cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` when logged out, a validation error for
    /// bad shipping details or an empty cart, or the API error.
    pub async fn checkout(
        &self,
        shipping: &ShippingForm,
        method: PaymentMethod,
    ) -> Result<CheckoutReceipt> {
        let user = self.require_user()?;
        let details = shipping.validate()?;

        let cart = self.api().cart().get(&user.id).await?;
        let cart_id = match cart.id {
            Some(id) if !cart.is_empty() => id,
            _ => return Err(AppError::Validation(EMPTY_CART_MESSAGE.to_string())),
        };

        add_breadcrumb(
            "checkout",
            "Placing order",
            Some(&[("cart_id", cart_id.as_str())]),
        );
        let order = self.api().orders().create(&cart_id).await?;
        let payment = self.api().payment().process(&order.id, method).await?;

        tracing::info!(
            order_id = %order.id,
            total = %order.total_amount,
            method = %method,
            city = %details.city,
            "Order placed"
        );
        Ok(CheckoutReceipt { order, payment })
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Create a product from the admin form.
    ///
    /// # Errors
    ///
    /// Returns an error when not an admin, on invalid input, or the API
    /// error.
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product> {
        self.require_admin()?;
        let input = form.validate()?;
        self.api().products().create(&input).await
    }

    /// Replace a product with the admin form contents.
    ///
    /// # Errors
    ///
    /// Returns an error when not an admin, on invalid input, or the API
    /// error.
    pub async fn update_product(&self, id: &ProductId, form: &ProductForm) -> Result<Product> {
        self.require_admin()?;
        let input = form.validate()?;
        self.api().products().update(id, &input).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error when not an admin, or the API error.
    pub async fn delete_product(&self, id: &ProductId) -> Result<MessageResponse> {
        self.require_admin()?;
        self.api().products().delete(id).await
    }

    /// Stock overview for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error when not an admin, or the API error.
    pub async fn inventory(&self) -> Result<InventorySummary> {
        self.require_admin()?;
        let products = self.api().products().list().await?;
        Ok(InventorySummary::from_products(&products))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::session::MemoryStorage;
    use serde_json::json;

    /// Points at a closed port; tests here must fail before any request.
    fn storefront() -> Storefront<MemoryStorage> {
        let api = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9").unwrap()).unwrap();
        Storefront::new(api, SessionStore::new(MemoryStorage::new()))
    }

    fn login_as(storefront: &Storefront<MemoryStorage>, roles: &[&str]) {
        let session: Session = serde_json::from_value(json!({
            "id": "65f1c0ffee0000000000abcd",
            "first_name": "Sana",
            "last_name": "Mir",
            "email": "sana@example.com",
            "role": {"id": "r1", "name": roles},
        }))
        .unwrap();
        storefront.session().save_session(&session);
    }

    #[test]
    fn test_require_user() {
        let storefront = storefront();
        assert!(matches!(storefront.require_user(), Err(AppError::Session)));

        login_as(&storefront, &["user"]);
        assert_eq!(storefront.require_user().unwrap().first_name, "Sana");

        storefront.logout();
        assert!(matches!(storefront.require_user(), Err(AppError::Session)));
    }

    #[test]
    fn test_require_admin() {
        let storefront = storefront();
        login_as(&storefront, &["user"]);
        let err = storefront.require_admin().unwrap_err();
        assert_eq!(err.to_string(), ADMIN_REQUIRED_MESSAGE);

        login_as(&storefront, &["user", "admin"]);
        assert!(storefront.require_admin().is_ok());
    }

    #[tokio::test]
    async fn test_login_validates_before_network() {
        let storefront = storefront();
        let err = storefront.login(&LoginForm::default()).await.unwrap_err();
        assert!(matches!(&err, AppError::Validation(msg) if msg == "Email is required"));
        assert!(!storefront.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_checkout_requires_login_then_valid_shipping() {
        let storefront = storefront();
        let shipping = ShippingForm::default();

        let err = storefront
            .checkout(&shipping, PaymentMethod::Cash)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Session));

        login_as(&storefront, &["user"]);
        let err = storefront
            .checkout(&shipping, PaymentMethod::Cash)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please enter your address");
    }

    #[tokio::test]
    async fn test_admin_operations_are_gated() {
        let storefront = storefront();
        login_as(&storefront, &["user"]);
        let id = ProductId::new("p1");

        let err = storefront.delete_product(&id).await.unwrap_err();
        assert_eq!(err.to_string(), ADMIN_REQUIRED_MESSAGE);
        let err = storefront
            .create_product(&ProductForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), ADMIN_REQUIRED_MESSAGE);
        let err = storefront.inventory().await.unwrap_err();
        assert_eq!(err.to_string(), ADMIN_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_admin_product_form_validated_before_network() {
        let storefront = storefront();
        login_as(&storefront, &["admin"]);
        let err = storefront
            .create_product(&ProductForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product name is required");
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_zero_quantity() {
        let storefront = storefront();
        login_as(&storefront, &["user"]);
        let err = storefront
            .add_to_cart(&ProductId::new("p1"), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
