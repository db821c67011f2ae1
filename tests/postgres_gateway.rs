//! Gateway against a live PostgreSQL. Runs only when `TEST_DATABASE_URL` is set.

use catalog_api::models::{NewProduct, NewUser, ProductPatch, UserPatch};
use catalog_api::{connect, Gateway, PgGateway, StoreError};
use tokio::sync::OnceCell;

static SCHEMA: OnceCell<()> = OnceCell::const_new();

async fn gateway() -> Option<PgGateway> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = connect(&url, 2).await.expect("connect");
    let gateway = PgGateway::new(pool);
    SCHEMA
        .get_or_init(|| async {
            gateway.ensure_schema().await.expect("schema");
            gateway.ensure_schema().await.expect("schema is idempotent");
        })
        .await;
    Some(gateway)
}

fn unique_email(tag: &str) -> String {
    format!("{}-{}@example.test", tag, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
async fn user_lifecycle_and_unique_email() {
    let Some(gw) = gateway().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let email = unique_email("life");
    let user = gw
        .insert_user(&NewUser {
            name: "A".into(),
            email: email.clone(),
            password: "p".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(user.id > 0);
    assert!(gw.list_users().await.unwrap().iter().any(|u| u.id == user.id));

    let dup = gw
        .insert_user(&NewUser {
            email: email.clone(),
            ..Default::default()
        })
        .await;
    assert!(matches!(dup, Err(StoreError::UniqueViolation(_))));

    let patch = UserPatch {
        name: Some("B".into()),
        ..Default::default()
    };
    assert_eq!(gw.update_user(user.id, &patch).await.unwrap(), 1);
    let found = gw.find_user(user.id).await.unwrap().unwrap();
    assert_eq!(found.name, "B");
    assert_eq!(found.email, email);

    assert_eq!(gw.delete_user(user.id).await.unwrap(), 1);
    assert_eq!(gw.delete_user(user.id).await.unwrap(), 0);
    assert!(gw.find_user(user.id).await.unwrap().is_none());

    // a soft-deleted row still holds its email
    let reuse = gw
        .insert_user(&NewUser {
            email: email.clone(),
            ..Default::default()
        })
        .await;
    match reuse {
        Err(StoreError::UniqueViolation(name)) => assert_eq!(name, catalog_api::migration::EMAIL_UNIQUE),
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[tokio::test]
async fn product_owner_sparse_update_and_soft_delete() {
    let Some(gw) = gateway().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let owner = gw
        .insert_user(&NewUser {
            email: unique_email("owner"),
            ..Default::default()
        })
        .await
        .unwrap();
    let product = gw
        .insert_product(&NewProduct {
            name: "lamp".into(),
            description: "desk lamp".into(),
            user_id: owner.id,
        })
        .await
        .unwrap();

    let loaded = gw.find_product(product.id).await.unwrap().unwrap();
    assert_eq!(loaded.user.as_ref().map(|u| u.id), Some(owner.id));

    let patch = ProductPatch {
        name: Some("bulb".into()),
        ..Default::default()
    };
    assert_eq!(gw.update_product(product.id, &patch).await.unwrap(), 1);
    let loaded = gw.find_product(product.id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "bulb");
    assert_eq!(loaded.description, "desk lamp");
    assert_eq!(loaded.user_id, owner.id);

    assert_eq!(gw.delete_product(product.id).await.unwrap(), 1);
    assert!(gw.find_product(product.id).await.unwrap().is_none());
    assert_eq!(gw.update_product(product.id, &patch).await.unwrap(), 0);

    let (deleted,): (bool,) = sqlx::query_as("SELECT deleted_at IS NOT NULL FROM products WHERE id = $1")
        .bind(product.id)
        .fetch_one(gw.pool())
        .await
        .unwrap();
    assert!(deleted);
}

#[tokio::test]
async fn dangling_owner_violates_foreign_key() {
    let Some(gw) = gateway().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let result = gw
        .insert_product(&NewProduct {
            name: "orphan".into(),
            user_id: i64::MAX,
            ..Default::default()
        })
        .await;
    assert!(matches!(result, Err(StoreError::ForeignKeyViolation(_))));
}
