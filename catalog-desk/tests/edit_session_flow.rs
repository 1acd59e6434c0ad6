//! End-to-end flows over the local backend: create, edit, cancel,
//! supplier sub-flow, comments and batch delete.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use tokio::sync::RwLock;

use catalog_client::CatalogBackend;
use catalog_desk::fields::FieldValue;
use catalog_desk::filters::{GroupKey, Grouping, FIELD_NAME};
use catalog_desk::session::{EditSession, SessionError, SessionState, SupplierForm};
use catalog_desk::store::{CatalogStores, LocalBackend};
use catalog_desk::table::ProductTable;
use shared::models::{Category, Product, Subcategory, Supplier, User};

fn seeded_stores() -> CatalogStores {
    let mut stores = CatalogStores::new(User {
        id: "1".into(),
        name: "John Lennon".into(),
    });

    stores.categories.insert(Category {
        id: "c1".into(),
        name: "Tools".into(),
    });
    stores.subcategories.insert(Subcategory {
        id: "sub1".into(),
        name: "Hand Tools".into(),
        category_id: "c1".into(),
    });
    stores.subcategories.insert(Subcategory {
        id: "sub2".into(),
        name: "Power Tools".into(),
        category_id: "c1".into(),
    });

    stores.suppliers.insert(supplier("AcmeCorp", "Acme Corp"));
    stores.suppliers.insert(supplier("GlobexInc", "Globex Inc"));

    stores
}

fn supplier(id: &str, name: &str) -> Supplier {
    Supplier {
        id: id.into(),
        name: name.into(),
        country: "US".into(),
        state: "CA".into(),
        city: "San Jose".into(),
        street: "1 Main St".into(),
        zip_code: "95113".into(),
    }
}

fn seeded_product(stores: &mut CatalogStores) -> Product {
    let product = stores.products.create(Product {
        id: String::new(),
        name: "Widget".into(),
        description: "A widget".into(),
        rating: 4.0,
        release_date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
        discount_date: None,
        price_cents: 50_00,
        image: None,
        category_id: "c1".into(),
        subcategory_ids: Vec::new(),
        supplier_ids: Vec::new(),
    });

    stores.link_subcategory(&product.id, "sub1");
    stores.link_supplier(&product.id, "AcmeCorp");
    product
}

fn backend(stores: CatalogStores) -> LocalBackend {
    LocalBackend::new(Arc::new(RwLock::new(stores)))
}

#[tokio::test]
async fn create_product_appears_in_store_with_generated_id() {
    let backend = backend(seeded_stores());

    let mut session = EditSession::create();
    assert!(session.is_create_mode());

    session.set_name(Some("Widget".into()));
    session.set_price_cents(Some(50_00));
    session.set_category(Some("c1".into()));
    session.select_subcategories(vec!["sub1".into()]);
    session.set_release_date(NaiveDate::from_ymd_opt(2024, 1, 10));

    let id = session.save(&backend).await.expect("save succeeds");
    assert!(!id.is_empty());
    assert_eq!(session.state(), SessionState::Viewing);

    let details = backend.fetch_product(&id).await.unwrap();
    assert_eq!(details.product.name, "Widget");
    assert_eq!(details.product.subcategory_ids, vec!["sub1".to_string()]);
    assert!(details.product.discount_date.is_none());

    // Price bucket groups the new product under "100 and less"
    let grouping = Grouping::new(GroupKey::Price, false);
    assert_eq!(grouping.bucket(&details.product).key, "LessThan100");
}

#[tokio::test]
async fn discount_date_before_release_blocks_save() {
    let mut stores = seeded_stores();
    let product = seeded_product(&mut stores);
    let backend = backend(stores);

    let snapshot = backend.list_products().await.unwrap();

    let details = backend.fetch_product(&product.id).await.unwrap();
    let mut session = EditSession::open(details);
    session.edit().unwrap();

    session.set_discount_date(NaiveDate::from_ymd_opt(2024, 1, 5));
    assert!(session.field_error("discount_date").is_some());

    let result = session.save(&backend).await;
    assert!(matches!(result, Err(SessionError::Invalid)));
    assert_eq!(session.state(), SessionState::Editing, "session stays editable");

    // The store is untouched
    assert_eq!(backend.list_products().await.unwrap(), snapshot);
}

#[tokio::test]
async fn edit_then_cancel_leaves_store_unchanged() {
    let mut stores = seeded_stores();
    let product = seeded_product(&mut stores);
    let backend = backend(stores);

    let snapshot = backend.list_products().await.unwrap();

    let details = backend.fetch_product(&product.id).await.unwrap();
    let mut session = EditSession::open(details);
    session.edit().unwrap();

    session.set_name(Some("Renamed".into()));
    session.set_price_cents(Some(1));
    session.remove_supplier("AcmeCorp");
    session.cancel().unwrap();

    assert_eq!(session.state(), SessionState::Viewing);
    assert_eq!(backend.list_products().await.unwrap(), snapshot);
}

#[tokio::test]
async fn cancelled_create_leaves_no_supplier_relations() {
    let backend = backend(seeded_stores());

    let mut session = EditSession::create();
    session.add_supplier(supplier("AcmeCorp", "Acme Corp"));
    session.add_supplier(supplier("GlobexInc", "Globex Inc"));
    assert_eq!(session.suppliers_to_add().len(), 2);

    session.cancel().unwrap();
    assert_eq!(session.state(), SessionState::Closed);

    let stores = backend.stores();
    let stores = stores.read().await;
    assert!(stores.product_suppliers.is_empty());
    assert!(stores.products.is_empty());
}

#[tokio::test]
async fn update_applies_scalar_diff_and_relation_deltas_in_one_batch() {
    let mut stores = seeded_stores();
    let product = seeded_product(&mut stores);
    let backend = backend(stores);

    let details = backend.fetch_product(&product.id).await.unwrap();
    let mut session = EditSession::open(details);
    session.edit().unwrap();

    session.set_price_cents(Some(120_00));
    session.select_subcategories(vec!["sub2".into()]);
    session.remove_supplier("AcmeCorp");
    session.add_supplier(supplier("GlobexInc", "Globex Inc"));

    session.save(&backend).await.expect("save succeeds");

    let details = backend.fetch_product(&product.id).await.unwrap();
    assert_eq!(details.product.price_cents, 120_00);
    assert_eq!(details.product.name, "Widget", "untouched fields survive");
    assert_eq!(details.product.subcategory_ids, vec!["sub2".to_string()]);
    assert_eq!(details.product.supplier_ids, vec!["GlobexInc".to_string()]);

    // A later edit drafts from the refreshed committed state
    session.edit().unwrap();
    assert_eq!(session.draft().price_cents, Some(120_00));
    assert_eq!(session.draft().subcategory_ids, vec!["sub2".to_string()]);
}

#[tokio::test]
async fn inline_supplier_creation_feeds_the_edit_session() {
    let mut stores = seeded_stores();
    let product = seeded_product(&mut stores);
    let backend = backend(stores);

    // Geography lookups degrade to empty lists without a network
    let config = catalog_client::ClientConfig::new("http://localhost:8080")
        .with_geo_base_url("http://127.0.0.1:9/v1/countries")
        .with_timeout(1);
    let geo = config.build_geo_client();

    let mut form = SupplierForm::open(&geo).await;
    form.set_name(Some("Initech LLC".into()));
    form.set_country(&geo, Some("US".into())).await;
    form.set_state(&geo, Some("TX".into())).await;
    form.set_city(Some("Austin".into()));
    form.set_street(Some("42 Silicon Alley".into()));
    form.set_zip_code(Some("73301".into()));

    let created = form.confirm(&backend).await.expect("supplier created");
    assert_eq!(created.id, "InitechLLC", "name-derived id");

    let details = backend.fetch_product(&product.id).await.unwrap();
    let mut session = EditSession::open(details);
    session.edit().unwrap();
    session.add_supplier(created);
    session.save(&backend).await.expect("save succeeds");

    let details = backend.fetch_product(&product.id).await.unwrap();
    assert!(details
        .product
        .supplier_ids
        .contains(&"InitechLLC".to_string()));

    // Cancelling a later edit never undoes the persisted master record
    let stores = backend.stores();
    let stores = stores.read().await;
    assert!(stores.suppliers.contains("InitechLLC"));
}

#[tokio::test]
async fn incomplete_supplier_form_is_rejected() {
    let backend = backend(seeded_stores());

    let mut form = SupplierForm::default();
    form.set_name(Some("No Address Ltd".into()));
    form.set_zip_code(Some("12".into()));

    let result = form.confirm(&backend).await;
    assert!(matches!(result, Err(SessionError::Invalid)));
    assert!(form.field_error("zip_code").is_some());
    assert!(form.field_error("street").is_some());

    let stores = backend.stores();
    assert_eq!(stores.read().await.suppliers.len(), 2, "nothing was created");
}

#[tokio::test]
async fn posted_comment_is_stamped_and_stored() {
    let mut stores = seeded_stores();
    let product = seeded_product(&mut stores);
    let author = stores.current_user.name.clone();
    let backend = backend(stores);

    let details = backend.fetch_product(&product.id).await.unwrap();
    let session = EditSession::open(details);

    session
        .post_comment(&backend, "Great product", &author)
        .await
        .expect("comment posted");

    let details = backend.fetch_product(&product.id).await.unwrap();
    assert_eq!(details.comments.len(), 1);
    assert_eq!(details.comments[0].author, "John Lennon");
    assert!(!details.comments[0].id.is_empty());
}

#[tokio::test]
async fn confirmed_batch_delete_removes_all_selected() {
    let mut stores = seeded_stores();
    for name in ["Anvil", "Drill", "Mallet"] {
        stores.products.create(Product {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            rating: 3.0,
            release_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            discount_date: None,
            price_cents: 10_00,
            image: None,
            category_id: "c1".into(),
            subcategory_ids: Vec::new(),
            supplier_ids: Vec::new(),
        });
    }
    let backend = backend(stores);

    let mut table = ProductTable::new();
    table.refresh(&backend).await.unwrap();
    assert_eq!(table.visible().len(), 3);

    let ids: Vec<String> = table.visible().iter().map(|p| p.id.clone()).collect();
    table.set_selected(ids.clone());

    // Rejected confirmation: nothing changes, selection preserved
    let deleted = table.delete_selected(&backend, false).await.unwrap();
    assert_eq!(deleted, 0);
    assert_eq!(table.visible().len(), 3);
    assert_eq!(table.selected_ids(), ids.as_slice());

    // Accepted confirmation: all three go in one batch
    let deleted = table.delete_selected(&backend, true).await.unwrap();
    assert_eq!(deleted, 3);
    assert!(table.visible().is_empty());
    assert!(table.selected_ids().is_empty());
    assert!(backend.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_single_delete_keeps_product() {
    let mut stores = seeded_stores();
    let product = seeded_product(&mut stores);
    let backend = backend(stores);

    let details = backend.fetch_product(&product.id).await.unwrap();
    let session = EditSession::open(details);

    assert!(!session.delete(&backend, false).await.unwrap());
    assert!(backend.fetch_product(&product.id).await.is_ok());

    assert!(session.delete(&backend, true).await.unwrap());
    assert!(backend.fetch_product(&product.id).await.is_err());
}

#[tokio::test]
async fn table_name_filter_narrows_visible_rows() {
    let mut stores = seeded_stores();
    seeded_product(&mut stores);
    let backend = backend(stores);

    let mut table = ProductTable::new();
    table.refresh(&backend).await.unwrap();

    table.set_filter_value(FIELD_NAME, FieldValue::Text(Some("widg".into())));
    assert_eq!(table.visible().len(), 1);

    table.reset_filters();
    assert_eq!(table.visible().len(), 1, "only the seeded product exists");
}
