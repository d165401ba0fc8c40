//! Catalogue management commands.
//!
//! The storefront checks the admin role before every operation, so a
//! regular user gets "Admin access required" without any request being
//! sent.
//!
//! # Usage
//!
//! ```bash
//! shopverse admin create -n "Brass Lamp" -p 4500 -s 12 --image ./lamp.png
//! shopverse admin update 65f1c0ffee0000000000abcd -s 0
//! shopverse admin delete 65f1c0ffee0000000000abcd
//! ```

use std::io::Write;

use shopverse_core::ProductId;
use shopverse_core::forms::ProductForm;
use shopverse_storefront::Storefront;
use shopverse_storefront::image::load_image_file;

use crate::{CliError, ProductArgs, output};

pub async fn create(
    shop: &Storefront,
    out: &mut impl Write,
    fields: ProductArgs,
) -> Result<(), CliError> {
    shop.require_admin()?;
    let form = apply(ProductForm::default(), fields).await?;
    let product = shop.create_product(&form).await?;
    writeln!(out, "Created product {}", product.id)?;
    write!(out, "{}", output::product_detail(&product))?;
    Ok(())
}

pub async fn update(
    shop: &Storefront,
    out: &mut impl Write,
    id: &str,
    fields: ProductArgs,
) -> Result<(), CliError> {
    shop.require_admin()?;
    let id = ProductId::new(id);
    let current = shop.product(&id).await?;
    let form = apply(ProductForm::from_product(&current), fields).await?;
    let product = shop.update_product(&id, &form).await?;
    writeln!(out, "Updated product {}", product.id)?;
    write!(out, "{}", output::product_detail(&product))?;
    Ok(())
}

pub async fn delete(shop: &Storefront, out: &mut impl Write, id: &str) -> Result<(), CliError> {
    let response = shop.delete_product(&ProductId::new(id)).await?;
    writeln!(out, "{}", response.message)?;
    Ok(())
}

pub async fn inventory(shop: &Storefront, out: &mut impl Write) -> Result<(), CliError> {
    let summary = shop.inventory().await?;
    write!(out, "{}", output::inventory(&summary))?;
    Ok(())
}

/// Overlay the given fields on `form`. A local image replaces the URL with
/// an inline data URL.
async fn apply(mut form: ProductForm, fields: ProductArgs) -> Result<ProductForm, CliError> {
    let ProductArgs {
        name,
        description,
        price,
        stock,
        image_url,
        image,
    } = fields;

    if let Some(name) = name {
        form.name = name;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(price) = price {
        form.price = price;
    }
    if let Some(stock) = stock {
        form.stock = stock;
    }
    if let Some(image_url) = image_url {
        form.image_url = image_url;
    }
    if let Some(path) = image {
        form.image_url = load_image_file(&path).await?.data_url();
    }
    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_overlays_only_given_fields() {
        let form = ProductForm {
            name: "Brass Lamp".to_string(),
            description: "Hand polished".to_string(),
            price: "4500".to_string(),
            image_url: "https://cdn.example.com/lamp.png".to_string(),
            stock: "12".to_string(),
        };
        let fields = ProductArgs {
            stock: Some("0".to_string()),
            ..ProductArgs::default()
        };

        let form = apply(form, fields).await.unwrap();
        assert_eq!(form.name, "Brass Lamp");
        assert_eq!(form.price, "4500");
        assert_eq!(form.stock, "0");
        assert_eq!(form.image_url, "https://cdn.example.com/lamp.png");
    }

    #[tokio::test]
    async fn test_apply_rejects_missing_image_file() {
        let fields = ProductArgs {
            image: Some("/definitely/not/here.png".into()),
            ..ProductArgs::default()
        };
        let err = apply(ProductForm::default(), fields).await.unwrap_err();
        assert!(matches!(err, CliError::App(_)));
    }
}
