//! Cart, checkout and order history.

use std::io::Write;

use shopverse_core::forms::ShippingForm;
use shopverse_core::{PaymentMethod, ProductId};
use shopverse_storefront::Storefront;

use crate::{CliError, output};

pub async fn show(shop: &Storefront, out: &mut impl Write) -> Result<(), CliError> {
    let cart = shop.cart().await?;
    write!(out, "{}", output::cart(&cart))?;
    Ok(())
}

pub async fn add(
    shop: &Storefront,
    out: &mut impl Write,
    product_id: &str,
    quantity: u32,
) -> Result<(), CliError> {
    let cart = shop.add_to_cart(&ProductId::new(product_id), quantity).await?;
    writeln!(out, "Added to cart")?;
    write!(out, "{}", output::cart(&cart))?;
    Ok(())
}

pub async fn remove(
    shop: &Storefront,
    out: &mut impl Write,
    product_id: &str,
) -> Result<(), CliError> {
    shop.remove_from_cart(&ProductId::new(product_id)).await?;
    writeln!(out, "Removed from cart")?;
    Ok(())
}

pub async fn checkout(
    shop: &Storefront,
    out: &mut impl Write,
    address: String,
    city: String,
    phone: String,
    method: PaymentMethod,
) -> Result<(), CliError> {
    let shipping = ShippingForm {
        address,
        city,
        phone,
    };
    let receipt = shop.checkout(&shipping, method).await?;
    write!(out, "{}", output::receipt(&receipt))?;
    Ok(())
}

pub async fn orders(shop: &Storefront, out: &mut impl Write) -> Result<(), CliError> {
    let orders = shop.orders().await?;
    write!(out, "{}", output::orders(&orders))?;
    Ok(())
}
