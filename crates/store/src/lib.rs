//! `rueda-store`: catalog record store.
//!
//! Holds the four record kinds the importer reconciles and the
//! `RecordStore` contract it talks to. Two backends: an in-memory store and
//! a SQLite catalog file.

pub mod error;
pub mod memory;
pub mod model;
pub mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use model::{
    Attribute, AttributeId, AttributeValue, Catalog, CatalogCounts, InvoicePolicy, LinkId, NewProduct,
    Product, ProductAttributeLink, ProductId, ProductType, ValueId,
};
pub use sqlite::SqliteStore;

/// The record store the importer reconciles against.
///
/// `find_*` lookups are exact, case-sensitive string matches and may return
/// more than one record: nothing here enforces uniqueness of natural keys.
pub trait RecordStore {
    fn find_products(&self, name: &str) -> Result<Vec<Product>, StoreError>;
    fn create_product(&mut self, fields: NewProduct) -> Result<Product, StoreError>;

    fn find_attributes(&self, name: &str) -> Result<Vec<Attribute>, StoreError>;
    fn create_attribute(&mut self, name: &str) -> Result<Attribute, StoreError>;

    fn find_attribute_values(
        &self,
        attribute: AttributeId,
        name: &str,
    ) -> Result<Vec<AttributeValue>, StoreError>;
    fn create_attribute_value(
        &mut self,
        attribute: AttributeId,
        name: &str,
    ) -> Result<AttributeValue, StoreError>;

    fn find_links(
        &self,
        product: ProductId,
        attribute: AttributeId,
    ) -> Result<Vec<ProductAttributeLink>, StoreError>;
    fn create_link(
        &mut self,
        product: ProductId,
        attribute: AttributeId,
        values: &[ValueId],
    ) -> Result<ProductAttributeLink, StoreError>;
    /// Replace the value set of an existing link.
    fn update_link_values(&mut self, link: LinkId, values: &[ValueId]) -> Result<(), StoreError>;

    /// Every record in the store, ordered by id.
    fn snapshot(&self) -> Result<Catalog, StoreError>;

    fn counts(&self) -> Result<CatalogCounts, StoreError> {
        Ok(self.snapshot()?.counts())
    }
}
