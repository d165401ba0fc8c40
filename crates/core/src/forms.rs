//! Form-level validation.
//!
//! Each form collects raw text from the user and validates it in field
//! order, stopping at the first problem. A successful validation yields a
//! typed value that is safe to send to the backend; no network call should
//! happen before that.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::email::{Email, EmailError};
use crate::types::price::Price;
use crate::types::product::{Product, ProductInput};
use crate::validation::password::{PasswordError, PasswordStrength, validate_password};
use crate::validation::phone::{PhoneError, PhoneNumber, validate_phone_number};

/// Minimum length of first and last names after trimming.
pub const MIN_NAME_LENGTH: usize = 2;

/// Form validation failures. `Display` is the user-facing message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("First name is required")]
    FirstNameRequired,
    #[error("First name must be at least 2 characters")]
    FirstNameTooShort,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Last name must be at least 2 characters")]
    LastNameTooShort,
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter your address")]
    AddressRequired,
    #[error("Please enter your city")]
    CityRequired,
    #[error("Please enter your phone number")]
    PhoneRequired,
    #[error(transparent)]
    Phone(#[from] PhoneError),
    #[error("Product name is required")]
    ProductNameRequired,
    #[error("Valid price is required")]
    InvalidPrice,
    #[error("Valid stock quantity is required")]
    InvalidStock,
}

// =============================================================================
// Login
// =============================================================================

/// Raw login form input.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login credentials ready to send.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Require both fields. The email is trimmed; its format is left to
    /// the backend, which answers unknown addresses with "User not Found".
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if either field is empty.
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(EmailError::Required.into());
        }
        if self.password.is_empty() {
            return Err(PasswordError::Required.into());
        }
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Raw registration form input.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// A validated registration.
#[derive(Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: String,
    /// Strength of the accepted password.
    pub strength: PasswordStrength,
}

impl Registration {
    /// Weak (but valid) passwords should be confirmed by the user before
    /// the account is created.
    #[must_use]
    pub fn needs_confirmation(&self) -> bool {
        self.strength == PasswordStrength::Weak
    }
}

impl RegistrationForm {
    /// Validate names, email, password and confirmation, in that order.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] encountered.
    pub fn validate(&self) -> Result<Registration, FormError> {
        let first_name = required_name(
            &self.first_name,
            FormError::FirstNameRequired,
            FormError::FirstNameTooShort,
        )?;
        let last_name = required_name(
            &self.last_name,
            FormError::LastNameRequired,
            FormError::LastNameTooShort,
        )?;
        let email = Email::parse(&self.email)?;

        let report = validate_password(&self.password);
        if let Some(error) = report.error {
            return Err(error.into());
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        Ok(Registration {
            first_name,
            last_name,
            email,
            password: self.password.clone(),
            strength: report.strength,
        })
    }
}

fn required_name(raw: &str, missing: FormError, short: FormError) -> Result<String, FormError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(missing);
    }
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(short);
    }
    Ok(name.to_string())
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("strength", &self.strength)
            .finish()
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// Raw checkout shipping form input.
#[derive(Debug, Clone, Default)]
pub struct ShippingForm {
    pub address: String,
    pub city: String,
    pub phone: String,
}

/// Validated shipping details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    pub address: String,
    pub city: String,
    pub phone: PhoneNumber,
}

impl ShippingForm {
    /// Validate address, city and phone, in that order.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] encountered.
    pub fn validate(&self) -> Result<ShippingDetails, FormError> {
        let address = self.address.trim();
        if address.is_empty() {
            return Err(FormError::AddressRequired);
        }
        let city = self.city.trim();
        if city.is_empty() {
            return Err(FormError::CityRequired);
        }
        if self.phone.trim().is_empty() {
            return Err(FormError::PhoneRequired);
        }
        let phone = validate_phone_number(&self.phone)?;

        Ok(ShippingDetails {
            address: address.to_string(),
            city: city.to_string(),
            phone,
        })
    }
}

// =============================================================================
// Product (admin)
// =============================================================================

/// Raw admin product form input. Numeric fields are kept as typed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub stock: String,
}

impl ProductForm {
    /// Prefill the form for editing an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount().normalize().to_string(),
            image_url: product.image_url.clone(),
            stock: product.stock.to_string(),
        }
    }

    /// Validate into the full record sent on create and update.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when the name is blank, the price is not a
    /// positive number or the stock is not a non-negative whole number.
    pub fn validate(&self) -> Result<ProductInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::ProductNameRequired);
        }

        let price = Decimal::from_str(self.price.trim())
            .ok()
            .filter(|price| *price > Decimal::ZERO)
            .ok_or(FormError::InvalidPrice)?;

        let stock = self
            .stock
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidStock)?;

        Ok(ProductInput {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price: Price::new(price),
            image_url: self.image_url.trim().to_string(),
            stock,
        })
    }
}
