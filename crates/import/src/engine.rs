use std::collections::HashMap;

use rueda_io::SheetRow;
use rueda_store::{Attribute, AttributeValue, Product, RecordStore, StoreError};

use crate::config::ImportProfile;
use crate::error::ImportError;
use crate::model::ImportRow;

/// What `reconcile_link` did to the (product, attribute) link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    /// The link already carried the value.
    Unchanged,
    /// The value was appended to an existing link.
    Amended,
    /// A new link holding just this value was created.
    Created,
}

/// Drives the search-or-create pipeline for one import run.
///
/// The attribute set is resolved once in [`Reconciler::new`]; rows then only
/// touch products, values and links.
pub struct Reconciler<'a, S: RecordStore + ?Sized> {
    store: &'a mut S,
    profile: &'a ImportProfile,
    attributes: HashMap<String, Attribute>,
}

impl<'a, S: RecordStore + ?Sized> Reconciler<'a, S> {
    pub fn new(store: &'a mut S, profile: &'a ImportProfile) -> Result<Self, ImportError> {
        let mut attributes = HashMap::new();
        for name in profile.attribute_names() {
            let found = store.find_attributes(name)?;
            let attribute = search_or_create("attribute", name, found, || store.create_attribute(name))?;
            attributes.insert(name.to_string(), attribute);
        }
        Ok(Self { store, profile, attributes })
    }

    /// Reconcile rows in order. Stops at the first row with a blank name.
    pub fn run(&mut self, rows: &[SheetRow]) -> Result<(), ImportError> {
        let mut processed = 0usize;
        for sheet_row in rows {
            let row = ImportRow::from_sheet_row(sheet_row, self.profile);
            if row.name.is_none() {
                log::info!(
                    "row {}: blank name, stopping ({} later row(s) not read)",
                    row.line,
                    rows.len() - processed - 1
                );
                break;
            }
            self.process_row(&row)?;
            processed += 1;
        }
        log::info!("reconciled {processed} row(s)");
        Ok(())
    }

    fn process_row(&mut self, row: &ImportRow) -> Result<(), ImportError> {
        let Some(product) = self.resolve_product(row)? else {
            return Ok(());
        };

        let mut resolved: Vec<(Attribute, AttributeValue)> = Vec::with_capacity(row.values.len());
        for mapped in &row.values {
            let attribute = self.attribute(&mapped.attribute)?;
            let value = self.resolve_value(&attribute, &mapped.value)?;
            resolved.push((attribute, value));
        }

        for (attribute, value) in &resolved {
            let change = self.reconcile_link(&product, attribute, value)?;
            if change != LinkChange::Unchanged {
                log::debug!(
                    "row {}: {:?} link {} / {} = {}",
                    row.line,
                    change,
                    product.name,
                    attribute.name,
                    value.name
                );
            }
        }
        Ok(())
    }

    fn attribute(&self, name: &str) -> Result<Attribute, ImportError> {
        self.attributes.get(name).cloned().ok_or_else(|| {
            ImportError::ConfigValidation(format!("attribute '{name}' is not in the profile"))
        })
    }

    /// Find the product by exact name or create it from the row.
    ///
    /// An existing product is returned as stored; the row's code, barcode and
    /// description do not overwrite it. `None` for a sentinel row.
    pub fn resolve_product(&mut self, row: &ImportRow) -> Result<Option<Product>, ImportError> {
        let Some(fields) = row.new_product(&self.profile.product) else {
            return Ok(None);
        };
        let name = fields.name.clone();
        let found = self.store.find_products(&name)?;
        let product = search_or_create("product", &name, found, || self.store.create_product(fields))?;
        Ok(Some(product))
    }

    /// Find or create the value named `raw` under `attribute`. `raw` is used verbatim.
    pub fn resolve_value(
        &mut self,
        attribute: &Attribute,
        raw: &str,
    ) -> Result<AttributeValue, ImportError> {
        let found = self.store.find_attribute_values(attribute.id, raw)?;
        let key = format!("{}={raw}", attribute.name);
        let value = search_or_create("attribute value", &key, found, || {
            self.store.create_attribute_value(attribute.id, raw)
        })?;
        Ok(value)
    }

    /// Make sure the (product, attribute) link carries `value`, adding it if not.
    pub fn reconcile_link(
        &mut self,
        product: &Product,
        attribute: &Attribute,
        value: &AttributeValue,
    ) -> Result<LinkChange, ImportError> {
        let links = self.store.find_links(product.id, attribute.id)?;

        if links.iter().any(|l| l.contains(value.id)) {
            return Ok(LinkChange::Unchanged);
        }

        match links.first() {
            Some(link) => {
                let mut values = link.value_ids.clone();
                values.push(value.id);
                self.store.update_link_values(link.id, &values)?;
                Ok(LinkChange::Amended)
            }
            None => {
                self.store.create_link(product.id, attribute.id, &[value.id])?;
                Ok(LinkChange::Created)
            }
        }
    }
}

/// First of `found`, or the result of `create` when nothing matched.
fn search_or_create<T>(
    kind: &str,
    key: &str,
    found: Vec<T>,
    create: impl FnOnce() -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let matches = found.len();
    if let Some(first) = found.into_iter().next() {
        if matches > 1 {
            log::warn!("{matches} {kind} records match '{key}', using the first");
        }
        return Ok(first);
    }
    let created = create()?;
    log::debug!("created {kind} '{key}'");
    Ok(created)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
