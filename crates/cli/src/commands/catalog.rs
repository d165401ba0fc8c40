use std::io::Write;

use shopverse_core::ProductId;
use shopverse_storefront::Storefront;
use shopverse_storefront::search::filter_products;

use crate::{CliError, output};

pub async fn list(
    shop: &Storefront,
    out: &mut impl Write,
    search: Option<&str>,
) -> Result<(), CliError> {
    let products = shop.products().await?;
    let matches = filter_products(&products, search.unwrap_or_default());
    if matches.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }
    for product in matches {
        writeln!(out, "{}", output::product_row(product))?;
    }
    Ok(())
}

pub async fn show(shop: &Storefront, out: &mut impl Write, id: &str) -> Result<(), CliError> {
    let product = shop.product(&ProductId::new(id)).await?;
    write!(out, "{}", output::product_detail(&product))?;
    Ok(())
}
