// Catalog file persistence across reopen.

use rueda_store::{InvoicePolicy, NewProduct, ProductType, RecordStore, SqliteStore};

#[test]
fn catalog_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    {
        let mut store = SqliteStore::open(&path).unwrap();
        let product = store
            .create_product(NewProduct {
                name: "Tire A".into(),
                code: Some("P1".into()),
                barcode: None,
                description: Some("Summer tyre".into()),
                detailed_type: ProductType::Product,
                invoice_policy: InvoicePolicy::Delivery,
            })
            .unwrap();
        let speed = store.create_attribute("Velocidad").unwrap();
        let v = store.create_attribute_value(speed.id, "V").unwrap();
        store.create_link(product.id, speed.id, &[v.id]).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let catalog = store.snapshot().unwrap();
    assert_eq!(catalog.counts().products, 1);
    assert_eq!(catalog.products[0].description.as_deref(), Some("Summer tyre"));
    assert_eq!(catalog.products[0].barcode, None);
    assert_eq!(catalog.linked_values("Tire A", "Velocidad"), vec!["V"]);
}

#[test]
fn reopening_does_not_reset_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    let first = SqliteStore::open(&path).unwrap().create_attribute("Carga").unwrap();
    let second = SqliteStore::open(&path).unwrap().create_attribute("Marca").unwrap();
    assert!(second.id > first.id);
}
