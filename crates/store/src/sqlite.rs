// Catalog file backed by SQLite

use std::path::Path;

use rusqlite::{params, Connection};

use crate::memory::dedup;
use crate::model::{
    Attribute, AttributeId, AttributeValue, Catalog, InvoicePolicy, LinkId, NewProduct, Product,
    ProductAttributeLink, ProductId, ProductType, ValueId,
};
use crate::{RecordStore, StoreError};

// Natural keys (names) are not UNIQUE: lookups return every match.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    code TEXT,
    barcode TEXT,
    description TEXT,
    detailed_type TEXT NOT NULL,
    invoice_policy TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS attributes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS attribute_values (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    attribute_id INTEGER NOT NULL REFERENCES attributes(id),
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id INTEGER NOT NULL REFERENCES products(id),
    attribute_id INTEGER NOT NULL REFERENCES attributes(id)
);

CREATE TABLE IF NOT EXISTS link_values (
    link_id INTEGER NOT NULL REFERENCES links(id),
    value_id INTEGER NOT NULL REFERENCES attribute_values(id),
    position INTEGER NOT NULL,
    PRIMARY KEY (link_id, value_id)
);

CREATE INDEX IF NOT EXISTS idx_products_name ON products(name);
CREATE INDEX IF NOT EXISTS idx_attributes_name ON attributes(name);
CREATE INDEX IF NOT EXISTS idx_values_attr_name ON attribute_values(attribute_id, name);
CREATE INDEX IF NOT EXISTS idx_links_product_attr ON links(product_id, attribute_id);
"#;

const PRODUCT_COLUMNS: &str = "id, name, code, barcode, description, detailed_type, invoice_policy";

/// Record store over a SQLite catalog file.
///
/// A link and its values are written in one transaction; every other
/// statement auto-commits. A failed import keeps whatever earlier rows
/// already wrote.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the catalog at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        log::debug!("opened catalog {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn query_products(&self, sql: &str, name: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<RawProduct> {
            Ok(RawProduct {
                id: row.get(0)?,
                name: row.get(1)?,
                code: row.get(2)?,
                barcode: row.get(3)?,
                description: row.get(4)?,
                detailed_type: row.get(5)?,
                invoice_policy: row.get(6)?,
            })
        };
        let raw: Vec<RawProduct> = match name {
            Some(name) => stmt.query_map(params![name], map_row)?.collect::<Result<_, _>>()?,
            None => stmt.query_map([], map_row)?.collect::<Result<_, _>>()?,
        };
        raw.into_iter().map(RawProduct::into_product).collect()
    }

    fn link_value_ids(&self, link: i64) -> Result<Vec<ValueId>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value_id FROM link_values WHERE link_id = ?1 ORDER BY position")?;
        let ids = stmt
            .query_map(params![link], |row| row.get::<_, i64>(0).map(ValueId))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn write_link_values(&self, link: i64, values: &[ValueId]) -> Result<(), StoreError> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO link_values (link_id, value_id, position) VALUES (?1, ?2, ?3)")?;
        for (position, value) in dedup(values).iter().enumerate() {
            stmt.execute(params![link, value.0, position as i64])?;
        }
        Ok(())
    }

    fn query_links(
        &self,
        sql: &str,
        filter: Option<(ProductId, AttributeId)>,
    ) -> Result<Vec<ProductAttributeLink>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(i64, i64, i64)> {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, i64>(2)?))
        };
        let heads: Vec<(i64, i64, i64)> = match filter {
            Some((product, attribute)) => stmt
                .query_map(params![product.0, attribute.0], map_row)?
                .collect::<Result<_, _>>()?,
            None => stmt.query_map([], map_row)?.collect::<Result<_, _>>()?,
        };

        heads
            .into_iter()
            .map(|(id, product_id, attribute_id)| {
                Ok(ProductAttributeLink {
                    id: LinkId(id),
                    product_id: ProductId(product_id),
                    attribute_id: AttributeId(attribute_id),
                    value_ids: self.link_value_ids(id)?,
                })
            })
            .collect()
    }
}

struct RawProduct {
    id: i64,
    name: String,
    code: Option<String>,
    barcode: Option<String>,
    description: Option<String>,
    detailed_type: String,
    invoice_policy: String,
}

impl RawProduct {
    fn into_product(self) -> Result<Product, StoreError> {
        let detailed_type = ProductType::parse(&self.detailed_type).ok_or_else(|| {
            StoreError::Corrupt(format!("product #{}: detailed_type '{}'", self.id, self.detailed_type))
        })?;
        let invoice_policy = InvoicePolicy::parse(&self.invoice_policy).ok_or_else(|| {
            StoreError::Corrupt(format!("product #{}: invoice_policy '{}'", self.id, self.invoice_policy))
        })?;
        Ok(Product {
            id: ProductId(self.id),
            name: self.name,
            code: self.code,
            barcode: self.barcode,
            description: self.description,
            detailed_type,
            invoice_policy,
        })
    }
}

impl RecordStore for SqliteStore {
    fn find_products(&self, name: &str) -> Result<Vec<Product>, StoreError> {
        self.query_products(
            &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ?1 ORDER BY id"),
            Some(name),
        )
    }

    fn create_product(&mut self, fields: NewProduct) -> Result<Product, StoreError> {
        self.conn.execute(
            "INSERT INTO products (name, code, barcode, description, detailed_type, invoice_policy) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.name,
                fields.code,
                fields.barcode,
                fields.description,
                fields.detailed_type.as_str(),
                fields.invoice_policy.as_str(),
            ],
        )?;
        let id = ProductId(self.conn.last_insert_rowid());
        Ok(Product::from_fields(id, fields))
    }

    fn find_attributes(&self, name: &str) -> Result<Vec<Attribute>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM attributes WHERE name = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map(params![name], |row| {
                Ok(Attribute { id: AttributeId(row.get(0)?), name: row.get(1)? })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn create_attribute(&mut self, name: &str) -> Result<Attribute, StoreError> {
        self.conn.execute("INSERT INTO attributes (name) VALUES (?1)", params![name])?;
        Ok(Attribute {
            id: AttributeId(self.conn.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    fn find_attribute_values(
        &self,
        attribute: AttributeId,
        name: &str,
    ) -> Result<Vec<AttributeValue>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, attribute_id, name FROM attribute_values \
             WHERE attribute_id = ?1 AND name = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![attribute.0, name], |row| {
                Ok(AttributeValue {
                    id: ValueId(row.get(0)?),
                    attribute_id: AttributeId(row.get(1)?),
                    name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn create_attribute_value(
        &mut self,
        attribute: AttributeId,
        name: &str,
    ) -> Result<AttributeValue, StoreError> {
        self.conn.execute(
            "INSERT INTO attribute_values (attribute_id, name) VALUES (?1, ?2)",
            params![attribute.0, name],
        )?;
        Ok(AttributeValue {
            id: ValueId(self.conn.last_insert_rowid()),
            attribute_id: attribute,
            name: name.to_string(),
        })
    }

    fn find_links(
        &self,
        product: ProductId,
        attribute: AttributeId,
    ) -> Result<Vec<ProductAttributeLink>, StoreError> {
        self.query_links(
            "SELECT id, product_id, attribute_id FROM links \
             WHERE product_id = ?1 AND attribute_id = ?2 ORDER BY id",
            Some((product, attribute)),
        )
    }

    fn create_link(
        &mut self,
        product: ProductId,
        attribute: AttributeId,
        values: &[ValueId],
    ) -> Result<ProductAttributeLink, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO links (product_id, attribute_id) VALUES (?1, ?2)",
            params![product.0, attribute.0],
        )?;
        let id = tx.last_insert_rowid();
        self.write_link_values(id, values)?;
        tx.commit()?;
        Ok(ProductAttributeLink {
            id: LinkId(id),
            product_id: product,
            attribute_id: attribute,
            value_ids: dedup(values),
        })
    }

    fn update_link_values(&mut self, link: LinkId, values: &[ValueId]) -> Result<(), StoreError> {
        let exists: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM links WHERE id = ?1",
            params![link.0],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(StoreError::NotFound { kind: "link", id: link.0 });
        }
        // Rolled back on drop, so a failed insert never loses the old values
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM link_values WHERE link_id = ?1", params![link.0])?;
        self.write_link_values(link.0, values)?;
        tx.commit()?;
        Ok(())
    }

    fn snapshot(&self) -> Result<Catalog, StoreError> {
        let products =
            self.query_products(&format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"), None)?;

        let attributes = {
            let mut stmt = self.conn.prepare("SELECT id, name FROM attributes ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| Ok(Attribute { id: AttributeId(row.get(0)?), name: row.get(1)? }))?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        let values = {
            let mut stmt = self
                .conn
                .prepare("SELECT id, attribute_id, name FROM attribute_values ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(AttributeValue {
                        id: ValueId(row.get(0)?),
                        attribute_id: AttributeId(row.get(1)?),
                        name: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        let links = self.query_links("SELECT id, product_id, attribute_id FROM links ORDER BY id", None)?;

        Ok(Catalog { products, attributes, values, links })
    }
}
