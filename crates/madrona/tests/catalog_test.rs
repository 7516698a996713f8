use madrona::catalog::{self, Product, Vendor};
use madrona::CatalogError;
use serde_json::json;

fn fixture() -> (Vec<Vendor>, Vec<Product>) {
    let vendors: Vec<Vendor> = serde_json::from_value(json!([
        { "id": "acme", "name": "Acme", "description": "Tooling vendor", "product_count": 2 },
        { "id": "initech", "name": "Initech" }
    ]))
    .unwrap();

    let products: Vec<Product> = serde_json::from_value(json!([
        {
            "id": "anvil",
            "name": "Anvil",
            "full_name": "Acme Anvil",
            "vendor_id": "acme",
            "type": "software",
            "versions": [
                {
                    "id": "1",
                    "name": "1.0",
                    "full_name": "Acme Anvil 1.0",
                    "product_id": "anvil",
                    "is_latest": false,
                    "predecessor_id": null
                },
                {
                    "id": "2",
                    "name": "2.0",
                    "full_name": "Acme Anvil 2.0",
                    "product_id": "anvil",
                    "is_latest": true,
                    "predecessor_id": "1",
                    "released_at": "2024-11-05"
                }
            ]
        },
        {
            "id": "rocket",
            "name": "Rocket",
            "full_name": "Acme Rocket",
            "vendor_id": "acme",
            "type": "hardware"
        },
        {
            "id": "tps",
            "name": "TPS Reports",
            "full_name": "Initech TPS Reports",
            "vendor_id": "initech",
            "type": "software"
        }
    ]))
    .unwrap();

    (vendors, products)
}

#[test]
fn composition_namespaces_ids_across_all_three_levels() {
    let (vendors, products) = fixture();
    let forest = catalog::catalog_forest(&vendors, &products).unwrap();

    assert_eq!(
        forest.node_ids(),
        vec![
            "acme",
            "acme_anvil",
            "acme_anvil_1",
            "acme_anvil_2",
            "acme_rocket",
            "initech",
            "initech_tps",
        ]
    );
    assert_eq!(forest.node("acme_anvil_2").map(|n| n.label.as_str()), Some("2.0"));
    assert_eq!(
        forest.ancestor_ids("acme_anvil_2"),
        vec!["acme_anvil", "acme"]
    );
}

#[test]
fn node_id_helpers_match_the_composed_forest() {
    let (vendors, products) = fixture();
    let forest = catalog::catalog_forest(&vendors, &products).unwrap();

    assert!(forest.contains(&catalog::vendor_node_id("initech")));
    assert!(forest.contains(&catalog::product_node_id("acme", "rocket")));
    assert!(forest.contains(&catalog::version_node_id("acme", "anvil", "1")));
}

#[test]
fn a_product_with_an_unknown_vendor_is_dropped() {
    let (vendors, mut products) = fixture();
    products[2].vendor_id = "gone".to_string();
    let forest = catalog::catalog_forest(&vendors, &products).unwrap();

    assert!(!forest.contains("initech_tps"));
    assert!(forest.contains("initech"));
}

#[test]
fn duplicate_vendor_ids_are_rejected() {
    let (mut vendors, products) = fixture();
    vendors.push(vendors[0].clone());
    let err = catalog::catalog_forest(&vendors, &products).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId { ref id } if id == "acme"));
}

#[test]
fn duplicate_version_ids_within_a_product_are_rejected() {
    let (vendors, mut products) = fixture();
    let dup = products[0].versions[0].clone();
    products[0].versions.push(dup);
    let err = catalog::catalog_forest(&vendors, &products).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId { ref id } if id == "acme_anvil_1"));
}

#[test]
fn empty_inputs_compose_an_empty_forest() {
    let forest = catalog::catalog_forest(&[], &[]).unwrap();
    assert!(forest.is_empty());
}

#[test]
fn optional_fields_deserialize_with_defaults() {
    let (vendors, products) = fixture();
    assert_eq!(vendors[1].description, None);
    assert_eq!(vendors[1].product_count, None);
    assert_eq!(products[1].versions.len(), 0);
    assert_eq!(products[0].versions[1].released_at.as_deref(), Some("2024-11-05"));
    assert_eq!(products[0].kind, "software");
}
