//! Integration tests for the item catalog
//!
//! Tests item lookup, qualification, instantiation, and flavored items.

use itemquery_foundation::{
    ErrorKind, ItemCatalog, ItemClass, ItemData, ItemTypeData, PreserveType, Salable, id,
};

fn catalog() -> ItemCatalog {
    ItemCatalog::standard()
        .with_item(id::OBJECT, ItemData::new("24", "Parsnip", 35))
        .with_item(id::OBJECT, ItemData::new("398", "Grape", 80))
        .with_item(id::OBJECT, ItemData::new("348", "Wine", 400))
        .with_item(id::BIG_CRAFTABLE, ItemData::new("24", "Mayonnaise Machine", 50))
        .with_item(id::HAT, ItemData::new("2", "Straw Hat", 100))
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn unqualified_ids_prefer_objects() {
    let catalog = catalog();
    assert_eq!(catalog.qualify("24").as_deref(), Some("(O)24"));
    assert_eq!(catalog.qualify("(BC)24").as_deref(), Some("(BC)24"));
    assert_eq!(catalog.qualify("2").as_deref(), Some("(H)2"));
    assert_eq!(catalog.qualify("9999"), None);
}

#[test]
fn create_item_uses_catalog_data() {
    let item = catalog().create_item("(BC)24").unwrap();
    assert_eq!(item.qualified_id, "(BC)24");
    assert_eq!(item.class, ItemClass::BigCraftable);
    assert_eq!(item.display_name, "Mayonnaise Machine");
    assert_eq!(item.stack, 1);
    assert_eq!(item.price, 50);
}

#[test]
fn create_item_unknown_id() {
    let err = catalog().create_item("(O)9999").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownItem(ref id) if id == "(O)9999"));
}

#[test]
fn from_types_extends_standard_types() {
    let catalog = ItemCatalog::from_types(vec![ItemTypeData {
        identifier: "(O)".to_string(),
        items: vec![ItemData::new("24", "Parsnip", 35)],
        ..ItemTypeData::default()
    }])
    .unwrap();
    assert!(catalog.contains("(O)24"));
    assert!(catalog.item_type(id::FLOORING).is_some());

    let bad = ItemCatalog::from_types(vec![ItemTypeData {
        identifier: "Objects".to_string(),
        ..ItemTypeData::default()
    }]);
    assert!(matches!(bad.unwrap_err().kind, ErrorKind::Data(_)));
}

// =============================================================================
// Sale Prices
// =============================================================================

#[test]
fn objects_sell_for_double_their_price() {
    let catalog = catalog();
    assert_eq!(catalog.create_item("(O)24").unwrap().sale_price(), 70);
    assert_eq!(catalog.create_item("(H)2").unwrap().sale_price(), 100);

    let mut recipe = catalog.create_item("(O)24").unwrap();
    recipe.is_recipe = true;
    assert_eq!(Salable::Item(recipe).sale_price(), 35);
}

// =============================================================================
// Flavored Items
// =============================================================================

#[test]
fn wine_from_grapes() {
    let catalog = catalog();
    let grape = catalog.create_item("(O)398").unwrap();
    let wine = catalog.create_flavored(PreserveType::Wine, Some(&grape)).unwrap();
    assert_eq!(wine.qualified_id, "(O)348");
    assert_eq!(wine.display_name, "Grape Wine");
    assert_eq!(wine.price, 240);
    assert_eq!(wine.preserved_item_id.as_deref(), Some("(O)398"));
}

#[test]
fn wild_honey_needs_no_ingredient() {
    let honey = catalog().create_flavored(PreserveType::Honey, None).unwrap();
    assert_eq!(honey.display_name, "Wild Honey");
    assert!(catalog().create_flavored(PreserveType::Jelly, None).is_err());
}

#[test]
fn preserve_names_parse_case_insensitively() {
    assert_eq!("agedroe".parse::<PreserveType>().unwrap(), PreserveType::AgedRoe);
    assert!("Marmalade".parse::<PreserveType>().is_err());
}
