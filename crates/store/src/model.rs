use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AttributeId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ValueId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkId(pub i64);

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductType {
    /// Storable product (stock tracked).
    #[default]
    #[serde(rename = "product")]
    Product,
    #[serde(rename = "consu")]
    Consumable,
    #[serde(rename = "service")]
    Service,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Consumable => "consu",
            Self::Service => "service",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "product" => Some(Self::Product),
            "consu" => Some(Self::Consumable),
            "service" => Some(Self::Service),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoicePolicy {
    /// Invoice delivered quantities.
    #[default]
    Delivery,
    /// Invoice ordered quantities.
    Order,
}

impl InvoicePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Order => "order",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "delivery" => Some(Self::Delivery),
            "order" => Some(Self::Order),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoicePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields for a product about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub code: Option<String>,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub detailed_type: ProductType,
    pub invoice_policy: InvoicePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub detailed_type: ProductType,
    pub invoice_policy: InvoicePolicy,
}

impl Product {
    pub fn from_fields(id: ProductId, fields: NewProduct) -> Self {
        Self {
            id,
            name: fields.name,
            code: fields.code,
            barcode: fields.barcode,
            description: fields.description,
            detailed_type: fields.detailed_type,
            invoice_policy: fields.invoice_policy,
        }
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
}

/// A value scoped to exactly one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValue {
    pub id: ValueId,
    pub attribute_id: AttributeId,
    pub name: String,
}

/// Binds a product to one attribute and the values it carries for it.
///
/// `value_ids` keeps insertion order and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAttributeLink {
    pub id: LinkId,
    pub product_id: ProductId,
    pub attribute_id: AttributeId,
    pub value_ids: Vec<ValueId>,
}

impl ProductAttributeLink {
    pub fn contains(&self, value: ValueId) -> bool {
        self.value_ids.contains(&value)
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub products: usize,
    pub attributes: usize,
    pub values: usize,
    pub links: usize,
}

impl CatalogCounts {
    /// Records present in `self` but not in `before`, per kind.
    pub fn since(&self, before: &CatalogCounts) -> CatalogCounts {
        CatalogCounts {
            products: self.products.saturating_sub(before.products),
            attributes: self.attributes.saturating_sub(before.attributes),
            values: self.values.saturating_sub(before.values),
            links: self.links.saturating_sub(before.links),
        }
    }
}

/// Full contents of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub attributes: Vec<Attribute>,
    pub values: Vec<AttributeValue>,
    pub links: Vec<ProductAttributeLink>,
}

impl Catalog {
    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            products: self.products.len(),
            attributes: self.attributes.len(),
            values: self.values.len(),
            links: self.links.len(),
        }
    }

    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    pub fn value(&self, id: ValueId) -> Option<&AttributeValue> {
        self.values.iter().find(|v| v.id == id)
    }

    pub fn links_for(&self, product: ProductId) -> impl Iterator<Item = &ProductAttributeLink> {
        self.links.iter().filter(move |l| l.product_id == product)
    }

    /// Value names linked to `product` under the attribute called `attribute`,
    /// in link order. Empty when there is no such link.
    pub fn linked_values(&self, product: &str, attribute: &str) -> Vec<String> {
        let Some(product) = self.product_by_name(product) else {
            return Vec::new();
        };
        self.links_for(product.id)
            .filter(|l| self.attribute(l.attribute_id).is_some_and(|a| a.name == attribute))
            .flat_map(|l| l.value_ids.iter())
            .filter_map(|id| self.value(*id).map(|v| v.name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_since_saturates() {
        let before = CatalogCounts { products: 2, attributes: 13, values: 5, links: 4 };
        let after = CatalogCounts { products: 3, attributes: 13, values: 7, links: 4 };
        assert_eq!(
            after.since(&before),
            CatalogCounts { products: 1, attributes: 0, values: 2, links: 0 }
        );
        assert_eq!(before.since(&after), CatalogCounts::default());
    }

    #[test]
    fn product_type_names_match_serde() {
        for t in [ProductType::Product, ProductType::Consumable, ProductType::Service] {
            assert_eq!(ProductType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ProductType::parse("storable"), None);
        assert_eq!(InvoicePolicy::parse("delivery"), Some(InvoicePolicy::Delivery));
        assert_eq!(InvoicePolicy::parse("Delivery"), None);
    }

    #[test]
    fn linked_values_follow_link_order() {
        let catalog = Catalog {
            products: vec![Product::from_fields(
                ProductId(1),
                NewProduct {
                    name: "Tire A".into(),
                    code: Some("P1".into()),
                    barcode: None,
                    description: None,
                    detailed_type: ProductType::Product,
                    invoice_policy: InvoicePolicy::Delivery,
                },
            )],
            attributes: vec![Attribute { id: AttributeId(1), name: "Carga".into() }],
            values: vec![
                AttributeValue { id: ValueId(1), attribute_id: AttributeId(1), name: "91".into() },
                AttributeValue { id: ValueId(2), attribute_id: AttributeId(1), name: "95".into() },
            ],
            links: vec![ProductAttributeLink {
                id: LinkId(1),
                product_id: ProductId(1),
                attribute_id: AttributeId(1),
                value_ids: vec![ValueId(2), ValueId(1)],
            }],
        };
        assert_eq!(catalog.linked_values("Tire A", "Carga"), vec!["95", "91"]);
        assert!(catalog.linked_values("Tire A", "Velocidad").is_empty());
        assert!(catalog.linked_values("Tire B", "Carga").is_empty());
    }
}
