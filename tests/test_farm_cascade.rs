//! End-to-end test of the farm/product rules over HTTP, backed by the in-memory store:
//! 1) Create farms and products (nested and standalone).
//! 2) Delete a product and check the farm list is left alone.
//! 3) Delete a farm and check exactly its listed products are gone.

use farm_stand::{transport, CatalogService, MemoryCatalogStore};
use serde_json::{json, Value};
use std::sync::Arc;

async fn start_server() -> Result<String, Box<dyn std::error::Error>> {
    let app_state = transport::http::AppState {
        catalog: CatalogService::new(Arc::new(MemoryCatalogStore::new())),
    };
    let router = transport::http::create_router(app_state);

    // Ephemeral port so tests can run in parallel.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

async fn call(
    req: reqwest::RequestBuilder,
) -> Result<(reqwest::StatusCode, Value), Box<dyn std::error::Error>> {
    let resp = req.send().await?;
    let status = resp.status();
    let body = resp.json::<Value>().await?;
    Ok((status, body))
}

async fn create_farm(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let (status, body) = call(client.post(format!("{}/farms", base_url)).json(&json!({
        "name": name,
        "city": "Guinda",
        "email": "farm@example.test"
    })))
    .await?;
    assert_eq!(status, 201, "{body}");
    Ok(body["data"]["id"].as_str().unwrap().to_string())
}

async fn add_product(
    client: &reqwest::Client,
    base_url: &str,
    farm_id: &str,
    record: Value,
) -> Result<String, Box<dyn std::error::Error>> {
    let (status, body) = call(
        client
            .post(format!("{}/farms/{}/products", base_url, farm_id))
            .json(&record),
    )
    .await?;
    assert_eq!(status, 201, "{body}");
    Ok(body["data"]["id"].as_str().unwrap().to_string())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_farm_cascade() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    let farm = create_farm(&client, &base_url, "Full Belly Farms").await?;
    let other = create_farm(&client, &base_url, "Blue Hill").await?;

    // --- Nested creation links both sides and normalizes category ---
    let kale = add_product(
        &client,
        &base_url,
        &farm,
        json!({ "name": "Kale", "price": 3, "category": "Vegetable" }),
    )
    .await?;
    let milk = add_product(
        &client,
        &base_url,
        &farm,
        json!({ "name": "Milk", "price": "4.25", "category": "dairy" }),
    )
    .await?;
    let plum = add_product(
        &client,
        &base_url,
        &other,
        json!({ "name": "Plum", "price": 1.5, "category": "fruit" }),
    )
    .await?;

    let (status, product) = call(client.get(format!("{}/products/{}", base_url, kale))).await?;
    assert_eq!(status, 200);
    assert_eq!(product["data"]["category"], "vegetable");
    assert_eq!(product["data"]["farm"]["id"], farm.as_str());
    assert_eq!(product["data"]["farm"]["name"], "Full Belly Farms");

    let (_, detail) = call(client.get(format!("{}/farms/{}", base_url, farm))).await?;
    let listed: Vec<&str> = detail["data"]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec![kale.as_str(), milk.as_str()]);

    // --- Standalone product delete does not touch the farm list ---
    let (status, body) = call(client.delete(format!("{}/products/{}", base_url, milk))).await?;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["deleted"], true);
    let (_, detail) = call(client.get(format!("{}/farms/{}", base_url, farm))).await?;
    assert_eq!(detail["data"]["products"].as_array().unwrap().len(), 1);

    // --- Farm delete cascades to exactly its listed products ---
    let (status, body) = call(client.delete(format!("{}/farms/{}", base_url, farm))).await?;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["deleted"], true);
    assert_eq!(body["data"]["cascaded_products"], 1);

    let (status, _) = call(client.get(format!("{}/products/{}", base_url, kale))).await?;
    assert_eq!(status, 404);
    let (status, _) = call(client.get(format!("{}/farms/{}", base_url, farm))).await?;
    assert_eq!(status, 404);
    let (status, _) = call(client.get(format!("{}/products/{}", base_url, plum))).await?;
    assert_eq!(status, 200);

    // --- Deleting it again is a no-op success ---
    let (status, body) = call(client.delete(format!("{}/farms/{}", base_url, farm))).await?;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["deleted"], false);
    assert_eq!(body["data"]["cascaded_products"], 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rejected_writes_change_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();
    let farm = create_farm(&client, &base_url, "Careful Farm").await?;

    // Negative price: validation failure, no writes.
    let (status, body) = call(
        client
            .post(format!("{}/farms/{}/products", base_url, farm))
            .json(&json!({ "name": "Kale", "price": -1 })),
    )
    .await?;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Validation failed"));
    assert_eq!(body["data"]["errors"][0]["field"], "price");

    // Unknown farm: not found, no writes.
    let missing = uuid::Uuid::new_v4();
    let (status, body) = call(
        client
            .post(format!("{}/farms/{}/products", base_url, missing))
            .json(&json!({ "name": "Kale", "price": 3 })),
    )
    .await?;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Farm not found");

    let (_, detail) = call(client.get(format!("{}/farms/{}", base_url, farm))).await?;
    assert!(detail["data"]["products"].as_array().unwrap().is_empty());
    let (_, list) = call(client.get(format!("{}/products", base_url))).await?;
    assert!(list["data"]["products"].as_array().unwrap().is_empty());
    assert_eq!(list["data"]["category"], "All");

    // Invalid category on a standalone create.
    let (status, _) = call(
        client
            .post(format!("{}/products", base_url))
            .json(&json!({ "name": "Ham", "price": 8, "category": "meat" })),
    )
    .await?;
    assert_eq!(status, 400);

    // Missing required farm fields are all reported.
    let (status, body) = call(client.post(format!("{}/farms", base_url)).json(&json!({}))).await?;
    assert_eq!(status, 400);
    assert_eq!(body["data"]["errors"].as_array().unwrap().len(), 2);

    // Malformed id and malformed JSON.
    let (status, _) = call(client.get(format!("{}/farms/not-a-uuid", base_url))).await?;
    assert_eq!(status, 400);
    let (status, _) = call(
        client
            .post(format!("{}/products", base_url))
            .header("content-type", "application/json")
            .body("{not json"),
    )
    .await?;
    assert_eq!(status, 422);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_product_update_and_filter() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = start_server().await?;
    let client = reqwest::Client::new();

    let (status, body) = call(
        client
            .post(format!("{}/products", base_url))
            .json(&json!({ "name": "Fig", "price": 2, "category": "FRUIT" })),
    )
    .await?;
    assert_eq!(status, 201);
    let fig = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["farm"], Value::Null);

    call(
        client
            .post(format!("{}/products", base_url))
            .json(&json!({ "name": "Leek", "price": 1, "category": "vegetable" })),
    )
    .await?;

    let (_, list) = call(client.get(format!("{}/products?category=Fruit", base_url))).await?;
    assert_eq!(list["data"]["category"], "fruit");
    assert_eq!(list["data"]["products"].as_array().unwrap().len(), 1);

    // Update replaces the given fields and re-validates.
    let (status, body) = call(
        client
            .put(format!("{}/products/{}", base_url, fig))
            .json(&json!({ "price": 2.75, "category": "dairy" })),
    )
    .await?;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["data"]["name"], "Fig");
    assert_eq!(body["data"]["price"], 2.75);
    assert_eq!(body["data"]["category"], "dairy");

    let (status, _) = call(
        client
            .put(format!("{}/products/{}", base_url, fig))
            .json(&json!({ "price": -3 })),
    )
    .await?;
    assert_eq!(status, 400);
    let (_, stored) = call(client.get(format!("{}/products/{}", base_url, fig))).await?;
    assert_eq!(stored["data"]["price"], 2.75);

    let (status, _) = call(
        client
            .put(format!("{}/products/{}", base_url, uuid::Uuid::new_v4()))
            .json(&json!({ "price": 1 })),
    )
    .await?;
    assert_eq!(status, 404);

    let (_, categories) = call(client.get(format!("{}/categories", base_url))).await?;
    assert_eq!(categories["data"], json!(["fruit", "vegetable", "dairy"]));

    let (status, health) = call(client.get(format!("{}/health", base_url))).await?;
    assert_eq!(status, 200);
    assert_eq!(health["data"]["status"], "ok");

    Ok(())
}
