//! In-memory record store.

use crate::model::{
    Attribute, AttributeId, AttributeValue, Catalog, LinkId, NewProduct, Product, ProductAttributeLink,
    ProductId, ValueId,
};
use crate::{RecordStore, StoreError};

/// `Vec`-backed store. Ids are assigned sequentially from 1 per record kind.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    catalog: Catalog,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(len: usize) -> i64 {
        len as i64 + 1
    }
}

impl RecordStore for MemoryStore {
    fn find_products(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        Ok(self.catalog.products.iter().filter(|p| p.name == name).cloned().collect())
    }

    fn create_product(&mut self, fields: NewProduct) -> Result<Product, StoreError> {
        let id = ProductId(Self::next_id(self.catalog.products.len()));
        let product = Product::from_fields(id, fields);
        self.catalog.products.push(product.clone());
        Ok(product)
    }

    fn find_attributes(&self, name: &str) -> Result<Vec<Attribute>, StoreError> {
        Ok(self.catalog.attributes.iter().filter(|a| a.name == name).cloned().collect())
    }

    fn create_attribute(&mut self, name: &str) -> Result<Attribute, StoreError> {
        let attribute = Attribute {
            id: AttributeId(Self::next_id(self.catalog.attributes.len())),
            name: name.to_string(),
        };
        self.catalog.attributes.push(attribute.clone());
        Ok(attribute)
    }

    fn find_attribute_values(
        &self,
        attribute: AttributeId,
        name: &str,
    ) -> Result<Vec<AttributeValue>, StoreError> {
        Ok(self
            .catalog
            .values
            .iter()
            .filter(|v| v.attribute_id == attribute && v.name == name)
            .cloned()
            .collect())
    }

    fn create_attribute_value(
        &mut self,
        attribute: AttributeId,
        name: &str,
    ) -> Result<AttributeValue, StoreError> {
        if self.catalog.attribute(attribute).is_none() {
            return Err(StoreError::NotFound { kind: "attribute", id: attribute.0 });
        }
        let value = AttributeValue {
            id: ValueId(Self::next_id(self.catalog.values.len())),
            attribute_id: attribute,
            name: name.to_string(),
        };
        self.catalog.values.push(value.clone());
        Ok(value)
    }

    fn find_links(
        &self,
        product: ProductId,
        attribute: AttributeId,
    ) -> Result<Vec<ProductAttributeLink>, StoreError> {
        Ok(self
            .catalog
            .links
            .iter()
            .filter(|l| l.product_id == product && l.attribute_id == attribute)
            .cloned()
            .collect())
    }

    fn create_link(
        &mut self,
        product: ProductId,
        attribute: AttributeId,
        values: &[ValueId],
    ) -> Result<ProductAttributeLink, StoreError> {
        let link = ProductAttributeLink {
            id: LinkId(Self::next_id(self.catalog.links.len())),
            product_id: product,
            attribute_id: attribute,
            value_ids: dedup(values),
        };
        self.catalog.links.push(link.clone());
        Ok(link)
    }

    fn update_link_values(&mut self, link: LinkId, values: &[ValueId]) -> Result<(), StoreError> {
        let existing = self
            .catalog
            .links
            .iter_mut()
            .find(|l| l.id == link)
            .ok_or(StoreError::NotFound { kind: "link", id: link.0 })?;
        existing.value_ids = dedup(values);
        Ok(())
    }

    fn snapshot(&self) -> Result<Catalog, StoreError> {
        Ok(self.catalog.clone())
    }
}

/// Drop repeated ids, keeping first occurrence order.
pub(crate) fn dedup(values: &[ValueId]) -> Vec<ValueId> {
    let mut out: Vec<ValueId> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(v) {
            out.push(*v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvoicePolicy, ProductType};

    fn tire(name: &str) -> NewProduct {
        NewProduct {
            name: name.into(),
            code: Some("P1".into()),
            barcode: None,
            description: None,
            detailed_type: ProductType::Product,
            invoice_policy: InvoicePolicy::Delivery,
        }
    }

    #[test]
    fn find_is_exact_and_case_sensitive() {
        let mut store = MemoryStore::new();
        store.create_product(tire("Tire A")).unwrap();
        assert_eq!(store.find_products("Tire A").unwrap().len(), 1);
        assert!(store.find_products("tire a").unwrap().is_empty());
        assert!(store.find_products("Tire A ").unwrap().is_empty());
    }

    #[test]
    fn values_are_scoped_to_attribute() {
        let mut store = MemoryStore::new();
        let load = store.create_attribute("Carga").unwrap();
        let width = store.create_attribute("Ancho").unwrap();
        store.create_attribute_value(load.id, "91").unwrap();

        assert_eq!(store.find_attribute_values(load.id, "91").unwrap().len(), 1);
        assert!(store.find_attribute_values(width.id, "91").unwrap().is_empty());
    }

    #[test]
    fn value_under_unknown_attribute_is_rejected() {
        let mut store = MemoryStore::new();
        let err = store.create_attribute_value(AttributeId(7), "91").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "attribute", id: 7 }));
    }

    #[test]
    fn link_update_replaces_value_set() {
        let mut store = MemoryStore::new();
        let product = store.create_product(tire("Tire A")).unwrap();
        let load = store.create_attribute("Carga").unwrap();
        let v91 = store.create_attribute_value(load.id, "91").unwrap();
        let v95 = store.create_attribute_value(load.id, "95").unwrap();

        let link = store.create_link(product.id, load.id, &[v91.id]).unwrap();
        store.update_link_values(link.id, &[v91.id, v95.id, v91.id]).unwrap();

        let links = store.find_links(product.id, load.id).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].value_ids, vec![v91.id, v95.id]);
    }

    #[test]
    fn update_of_missing_link_fails() {
        let mut store = MemoryStore::new();
        let err = store.update_link_values(LinkId(3), &[]).unwrap_err();
        assert_eq!(err.to_string(), "link #3 not found");
    }
}
