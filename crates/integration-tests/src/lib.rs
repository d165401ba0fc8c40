//! Integration tests for Shopverse.
//!
//! Tests drive the real [`ApiClient`](shopverse_storefront::ApiClient)
//! against [`MockBackend`], an in-process `axum` server that mirrors the
//! backend's routes, payload shapes and error bodies.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopverse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `api_errors` - Error normalization over real HTTP
//! - `auth` - Login, registration and the stored session
//! - `shopping` - Catalogue, cart, checkout and orders
//! - `admin` - Product management and the admin gate

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use shopverse_storefront::config::ApiConfig;
use shopverse_storefront::{ApiClient, AppError, MemoryStorage, SessionStore, Storefront};

// =============================================================================
// Seed data
// =============================================================================

pub const ADMIN_ID: &str = "65f1c0ffee00000000000001";
pub const ADMIN_EMAIL: &str = "admin@shopverse.pk";
pub const USER_ID: &str = "65f1c0ffee00000000000002";
pub const USER_EMAIL: &str = "sana@example.com";
/// Password of both seeded accounts.
pub const PASSWORD: &str = "Secure#2024";

pub const LAMP_ID: &str = "65f1c0ffee000000000000a1";
pub const MUG_ID: &str = "65f1c0ffee000000000000a2";
/// Seeded with zero stock.
pub const RUG_ID: &str = "65f1c0ffee000000000000a3";

struct User {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    roles: Vec<String>,
}

#[derive(Clone, Serialize)]
struct StoredProduct {
    id: String,
    name: String,
    description: String,
    price: f64,
    image_url: String,
    stock: u32,
}

struct StoredCart {
    id: String,
    lines: Vec<(String, u32)>,
}

#[derive(Default)]
struct Backend {
    next_id: u64,
    users: Vec<User>,
    products: Vec<StoredProduct>,
    /// Keyed by user ID.
    carts: HashMap<String, StoredCart>,
    orders: Vec<Value>,
}

impl Backend {
    fn seeded() -> Self {
        let user = |id: &str, first: &str, last: &str, email: &str, role: &str| User {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            roles: vec![role.to_string()],
        };
        let product = |id: &str, name: &str, description: &str, price: f64, stock: u32| {
            StoredProduct {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price,
                image_url: String::new(),
                stock,
            }
        };

        Self {
            next_id: 0x100,
            users: vec![
                user(ADMIN_ID, "Ayesha", "Khan", ADMIN_EMAIL, "admin"),
                user(USER_ID, "Sana", "Mir", USER_EMAIL, "user"),
            ],
            products: vec![
                product(LAMP_ID, "Brass Lamp", "Hand polished brass", 4500.0, 12),
                product(MUG_ID, "Clay Mug", "Holds 350ml", 850.0, 3),
                product(RUG_ID, "Wool Rug", "Hand-knotted", 32000.0, 0),
            ],
            ..Self::default()
        }
    }

    fn new_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:024x}", self.next_id)
    }

    fn product(&self, id: &str) -> Option<&StoredProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    fn cart_json(&self, user_id: &str) -> Value {
        let Some(cart) = self.carts.get(user_id) else {
            return json!({"id": null, "user": user_id, "items": []});
        };
        let items: Vec<Value> = cart
            .lines
            .iter()
            .map(|(product_id, quantity)| {
                json!({"product": self.product(product_id), "quantity": quantity})
            })
            .collect();
        json!({"id": cart.id, "user": user_id, "items": items})
    }
}

// =============================================================================
// Mock backend server
// =============================================================================

#[derive(Clone)]
struct Shared {
    backend: Arc<Mutex<Backend>>,
    requests: Arc<AtomicUsize>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A running mock backend. The server stops when this is dropped.
pub struct MockBackend {
    shared: Shared,
    base_url: String,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Start a seeded backend on an ephemeral local port.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let shared = Shared {
            backend: Arc::new(Mutex::new(Backend::seeded())),
            requests: Arc::new(AtomicUsize::new(0)),
        };
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let app = router(shared.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            shared,
            base_url,
            server,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API client pointed at this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn api(&self) -> Result<ApiClient, AppError> {
        let config =
            ApiConfig::new(&self.base_url).map_err(|e| AppError::Unexpected(e.to_string()))?;
        ApiClient::new(&config)
    }

    /// Storefront with an empty in-memory session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn storefront(&self) -> Result<Storefront<MemoryStorage>, AppError> {
        Ok(Storefront::new(
            self.api()?,
            SessionStore::new(MemoryStorage::new()),
        ))
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.shared.requests.load(Ordering::SeqCst)
    }

    /// Current stock of a product, without counting as a request.
    #[must_use]
    pub fn stock_of(&self, product_id: &str) -> Option<u32> {
        let backend = self
            .shared
            .backend
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        backend.product(product_id).map(|p| p.stock)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// URL of a local port with nothing listening on it.
///
/// # Errors
///
/// Returns an error if no ephemeral port can be bound.
pub async fn closed_port_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

fn router(shared: Shared) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/cart/{user_id}", get(get_cart).post(add_to_cart))
        .route("/cart/{user_id}/{product_id}", delete(remove_from_cart))
        .route("/orders", post(create_order))
        .route("/orders/{user_id}", get(list_orders))
        .route("/payment", post(process_payment))
        .route("/fail/{status}", get(fail_with_status))
        .route("/fail-validation", get(fail_validation))
        .route("/garbled", get(garbled))
        .with_state(shared)
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({"detail": message.into()}))).into_response()
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(shared): State<Shared>, Json(body): Json<LoginBody>) -> Response {
    let backend = shared.lock();
    let Some(user) = backend.users.iter().find(|u| u.email == body.email) else {
        return detail(StatusCode::NOT_FOUND, "User not Found");
    };
    if user.password != body.password {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect Password");
    }
    Json(json!({
        "id": user.id,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "role": {"id": "65f1c0ffee000000000000r1", "name": user.roles},
    }))
    .into_response()
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

async fn register(State(shared): State<Shared>, Json(body): Json<RegisterBody>) -> Response {
    let mut backend = shared.lock();
    if backend.users.iter().any(|u| u.email == body.email) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let id = backend.new_id();
    let response = json!({
        "id": id,
        "email": body.email,
        "first_name": body.first_name,
        "last_name": body.last_name,
        "role": {"id": "65f1c0ffee000000000000r1", "roles": ["user"]},
    });
    backend.users.push(User {
        id,
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        password: body.password,
        roles: vec!["user".to_string()],
    });
    Json(response).into_response()
}

// =============================================================================
// Products
// =============================================================================

#[derive(Deserialize)]
struct ProductBody {
    name: String,
    description: String,
    price: f64,
    image_url: String,
    stock: u32,
}

async fn list_products(State(shared): State<Shared>) -> Response {
    Json(shared.lock().products.clone()).into_response()
}

async fn get_product(State(shared): State<Shared>, Path(id): Path<String>) -> Response {
    match shared.lock().product(&id) {
        Some(product) => Json(product).into_response(),
        None => detail(StatusCode::NOT_FOUND, "Product not found"),
    }
}

async fn create_product(State(shared): State<Shared>, Json(body): Json<ProductBody>) -> Response {
    let mut backend = shared.lock();
    let product = StoredProduct {
        id: backend.new_id(),
        name: body.name,
        description: body.description,
        price: body.price,
        image_url: body.image_url,
        stock: body.stock,
    };
    backend.products.push(product.clone());
    Json(product).into_response()
}

async fn update_product(
    State(shared): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<ProductBody>,
) -> Response {
    let mut backend = shared.lock();
    let Some(product) = backend.products.iter_mut().find(|p| p.id == id) else {
        return detail(StatusCode::NOT_FOUND, "Product not found");
    };
    product.name = body.name;
    product.description = body.description;
    product.price = body.price;
    product.image_url = body.image_url;
    product.stock = body.stock;
    Json(product.clone()).into_response()
}

async fn delete_product(State(shared): State<Shared>, Path(id): Path<String>) -> Response {
    let mut backend = shared.lock();
    let before = backend.products.len();
    backend.products.retain(|p| p.id != id);
    if backend.products.len() == before {
        return detail(StatusCode::NOT_FOUND, "Product not found");
    }
    Json(json!({"message": "Product deleted successfully"})).into_response()
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Deserialize)]
struct AddToCartBody {
    product_id: String,
    quantity: i64,
}

async fn get_cart(State(shared): State<Shared>, Path(user_id): Path<String>) -> Response {
    let backend = shared.lock();
    if !backend.users.iter().any(|u| u.id == user_id) {
        return detail(StatusCode::NOT_FOUND, "User not found");
    }
    Json(backend.cart_json(&user_id)).into_response()
}

async fn add_to_cart(
    State(shared): State<Shared>,
    Path(user_id): Path<String>,
    Json(body): Json<AddToCartBody>,
) -> Response {
    let mut backend = shared.lock();
    let Ok(quantity) = u32::try_from(body.quantity) else {
        return detail(StatusCode::BAD_REQUEST, "Quantity must be greater than 0");
    };
    if quantity == 0 {
        return detail(StatusCode::BAD_REQUEST, "Quantity must be greater than 0");
    }
    let Some(stock) = backend.product(&body.product_id).map(|p| p.stock) else {
        return detail(StatusCode::NOT_FOUND, "Product not found");
    };

    let in_cart = backend
        .carts
        .get(&user_id)
        .and_then(|cart| cart.lines.iter().find(|(id, _)| *id == body.product_id))
        .map_or(0, |(_, qty)| *qty);
    if in_cart + quantity > stock {
        return detail(
            StatusCode::BAD_REQUEST,
            format!("Not enough stock available. Only {stock} items left"),
        );
    }

    if !backend.carts.contains_key(&user_id) {
        let id = backend.new_id();
        backend.carts.insert(
            user_id.clone(),
            StoredCart {
                id,
                lines: Vec::new(),
            },
        );
    }
    if let Some(cart) = backend.carts.get_mut(&user_id) {
        match cart.lines.iter_mut().find(|(id, _)| *id == body.product_id) {
            Some((_, qty)) => *qty += quantity,
            None => cart.lines.push((body.product_id, quantity)),
        }
    }
    Json(backend.cart_json(&user_id)).into_response()
}

async fn remove_from_cart(
    State(shared): State<Shared>,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Response {
    let mut backend = shared.lock();
    let Some(cart) = backend.carts.get_mut(&user_id) else {
        return detail(StatusCode::NOT_FOUND, "Cart not found");
    };
    let before = cart.lines.len();
    cart.lines.retain(|(id, _)| *id != product_id);
    if cart.lines.len() == before {
        return detail(StatusCode::NOT_FOUND, "Product not found in cart");
    }
    Json(json!({"message": "Product removed from cart"})).into_response()
}

// =============================================================================
// Orders and payment
// =============================================================================

#[derive(Deserialize)]
struct CreateOrderBody {
    cart_id: String,
}

async fn create_order(State(shared): State<Shared>, Json(body): Json<CreateOrderBody>) -> Response {
    let mut backend = shared.lock();
    let Some((user_id, lines)) = backend
        .carts
        .iter()
        .find(|(_, cart)| cart.id == body.cart_id)
        .map(|(user_id, cart)| (user_id.clone(), cart.lines.clone()))
    else {
        return detail(StatusCode::BAD_REQUEST, "Cart is empty or not found");
    };
    if lines.is_empty() {
        return detail(StatusCode::BAD_REQUEST, "Cart is empty or not found");
    }

    let mut items = Vec::new();
    let mut total = 0.0;
    for (product_id, quantity) in &lines {
        let Some(product) = backend.products.iter_mut().find(|p| p.id == *product_id) else {
            return detail(StatusCode::BAD_REQUEST, "Product not found");
        };
        if product.stock < *quantity {
            return detail(
                StatusCode::BAD_REQUEST,
                format!("not enough stock for {}", product.name),
            );
        }
        product.stock -= quantity;
        let subtotal = product.price * f64::from(*quantity);
        total += subtotal;
        items.push(json!({
            "product": product.clone(),
            "quantity": quantity,
            "price": product.price,
            "subtotal": subtotal,
        }));
    }

    let order = json!({
        "id": backend.new_id(),
        "user": user_id,
        "items": items,
        "total_amount": total,
        "status": "pending",
    });
    backend.orders.push(order.clone());
    if let Some(cart) = backend.carts.get_mut(&user_id) {
        cart.lines.clear();
    }
    Json(order).into_response()
}

async fn list_orders(State(shared): State<Shared>, Path(user_id): Path<String>) -> Response {
    let backend = shared.lock();
    let orders: Vec<&Value> = backend
        .orders
        .iter()
        .filter(|order| order.get("user").and_then(Value::as_str) == Some(user_id.as_str()))
        .collect();
    Json(orders).into_response()
}

#[derive(Deserialize)]
struct PaymentBody {
    order_id: String,
    payment_method: String,
}

async fn process_payment(State(shared): State<Shared>, Json(body): Json<PaymentBody>) -> Response {
    let mut backend = shared.lock();
    let payment_id = backend.new_id();
    let Some(order) = backend
        .orders
        .iter_mut()
        .find(|order| order.get("id").and_then(Value::as_str) == Some(body.order_id.as_str()))
    else {
        return detail(StatusCode::NOT_FOUND, "Order not found");
    };
    if let Some(status) = order.get_mut("status") {
        *status = json!("paid");
    }
    Json(json!({
        "id": payment_id,
        "order": body.order_id,
        "amount": order.get("total_amount"),
        "payment_method": body.payment_method,
        "status": "completed",
    }))
    .into_response()
}

// =============================================================================
// Failure fixtures
// =============================================================================

async fn fail_with_status(State(shared): State<Shared>, Path(status): Path<u16>) -> Response {
    shared.requests.fetch_add(1, Ordering::SeqCst);
    StatusCode::from_u16(status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}

async fn fail_validation(State(shared): State<Shared>) -> Response {
    shared.requests.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "detail": [
                {"loc": ["body", "email"], "msg": "field required", "type": "value_error.missing"},
                {"loc": ["body", "password"], "msg": "field required", "type": "value_error.missing"},
            ]
        })),
    )
        .into_response()
}

async fn garbled(State(shared): State<Shared>) -> Response {
    shared.requests.fetch_add(1, Ordering::SeqCst);
    (StatusCode::OK, "<html>maintenance</html>").into_response()
}
