// `rueda show` - read back what imports produced.

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use rueda_store::{Catalog, Product, RecordStore};

use crate::exit_codes::EXIT_ERROR;
use crate::util::{catalog_path, open_catalog};
use crate::CliError;

/// One product with its attribute values resolved to names.
#[derive(Debug, Serialize)]
struct ProductView<'a> {
    #[serde(flatten)]
    product: &'a Product,
    attributes: Vec<AttributeView<'a>>,
}

#[derive(Debug, Serialize)]
struct AttributeView<'a> {
    name: &'a str,
    values: Vec<&'a str>,
}

fn product_view<'a>(catalog: &'a Catalog, product: &'a Product) -> ProductView<'a> {
    let attributes = catalog
        .links_for(product.id)
        .filter_map(|link| {
            let attribute = catalog.attribute(link.attribute_id)?;
            let values = link
                .value_ids
                .iter()
                .filter_map(|id| catalog.value(*id).map(|v| v.name.as_str()))
                .collect();
            Some(AttributeView { name: &attribute.name, values })
        })
        .collect();
    ProductView { product, attributes }
}

pub(crate) fn cmd_show(
    catalog: Option<PathBuf>,
    product: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let path = catalog_path(catalog);
    if !path.is_file() {
        return Err(CliError::args(format!("catalog not found: {}", path.display()))
            .with_hint("run `rueda import <FILE>` first, or pass --catalog"));
    }
    let store = open_catalog(&path)?;
    let snapshot = store.snapshot().map_err(|e| CliError::store(e.to_string()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match product {
        Some(name) => {
            let found = snapshot.product_by_name(&name).ok_or_else(|| {
                CliError::new(EXIT_ERROR, format!("no product named '{}'", name))
            })?;
            let view = product_view(&snapshot, found);
            if json {
                write_json(&mut out, &view)?;
            } else {
                write_product(&mut out, &view).map_err(|e| CliError::io(e.to_string()))?;
            }
        }
        None if json => write_json(&mut out, &snapshot)?,
        None => {
            let counts = snapshot.counts();
            writeln!(
                out,
                "{} product(s), {} attribute(s), {} value(s), {} link(s)",
                counts.products, counts.attributes, counts.values, counts.links
            )
            .map_err(|e| CliError::io(e.to_string()))?;
            for product in &snapshot.products {
                write_product(&mut out, &product_view(&snapshot, product))
                    .map_err(|e| CliError::io(e.to_string()))?;
            }
        }
    }

    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::new(EXIT_ERROR, format!("JSON encoding failed: {}", e)))?;
    writeln!(out, "{}", text).map_err(|e| CliError::io(e.to_string()))
}

fn write_product(out: &mut impl Write, view: &ProductView<'_>) -> io::Result<()> {
    let p = view.product;
    write!(out, "{}", p.name)?;
    if let Some(code) = &p.code {
        write!(out, " [{}]", code)?;
    }
    if let Some(barcode) = &p.barcode {
        write!(out, " ({})", barcode)?;
    }
    writeln!(out)?;
    if let Some(description) = &p.description {
        writeln!(out, "  {}", description)?;
    }
    for attr in &view.attributes {
        writeln!(out, "  {}: {}", attr.name, attr.values.join(", "))?;
    }
    Ok(())
}
