//! Cascade and nested-creation rules against a real PostgreSQL store.
//!
//! Runs only when `DATABASE_URL` is set (e.g. in `.env`); otherwise it returns early.

use farm_stand::{CatalogError, CatalogService, CatalogStore, NewFarm, NewProduct, PostgresCatalogStore};
use std::env;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_cascade() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping test_postgres_cascade");
        return Ok(());
    };

    let store = Arc::new(PostgresCatalogStore::connect(&database_url, 2).await?);
    let catalog = CatalogService::new(store.clone());

    let farm = catalog
        .create_farm(NewFarm {
            name: "Pg Farm".into(),
            city: None,
            email: "pg@farm.test".into(),
        })
        .await?;
    let kale = catalog
        .add_product_to_farm(farm.id, NewProduct::new("Kale", 3.0, Some("Vegetable")))
        .await?;
    let loose = catalog
        .create_product(NewProduct::new("Brie", 7.0, Some("dairy")))
        .await?;

    let stored = store.find_product(kale.id).await?.expect("kale stored");
    assert_eq!(stored.farm, Some(farm.id));
    assert_eq!(store.find_farm(farm.id).await?.expect("farm").products, vec![kale.id]);

    let rejected = catalog
        .add_product_to_farm(farm.id, NewProduct::new("Kale", -1.0, None))
        .await;
    assert!(matches!(rejected, Err(CatalogError::Validation(_))));

    // Concurrent nested creations append atomically; neither id is lost.
    let (a, b) = tokio::join!(
        catalog.add_product_to_farm(farm.id, NewProduct::new("Leek", 2.0, None)),
        catalog.add_product_to_farm(farm.id, NewProduct::new("Plum", 1.0, Some("fruit"))),
    );
    let (a, b) = (a?, b?);
    let listed = store.find_farm(farm.id).await?.expect("farm").products;
    assert_eq!(listed.len(), 3);
    assert!(listed.contains(&a.id) && listed.contains(&b.id));

    let outcome = catalog.delete_farm(farm.id).await?;
    assert_eq!(outcome.cascaded_products, 3);
    assert!(store.find_product(kale.id).await?.is_none());
    assert!(store.find_product(loose.id).await?.is_some());
    assert!(catalog.delete_farm(farm.id).await?.farm.is_none());

    catalog.delete_product(loose.id).await?;
    Ok(())
}
