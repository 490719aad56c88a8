use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use server::state::ServerState;
use service::hospitals::HospitalStore;
use service::storage::json_file::JsonFileStorage;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated data file per test run
    let data_file = format!("target/test-data/{}/hospitals.json", Uuid::new_v4());
    let storage = JsonFileStorage::new(&data_file).await?;
    let hospitals = HospitalStore::new(Arc::new(storage));
    let state = ServerState { hospitals };

    let app: Router = routes::build_router(cors(), state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_full_crud_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // empty collection lists as an empty array, not an error
    let res = c.get(format!("{}/hospitals", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    // create
    let res = c
        .post(format!("{}/hospitals", app.base_url))
        .json(&json!({"name": "Mercy", "patientCount": 5, "location": "Springfield"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(
        created,
        json!({"id": 1, "name": "Mercy", "patientCount": 5, "location": "Springfield"})
    );

    // update keeps the id
    let res = c
        .put(format!("{}/hospitals/1", app.base_url))
        .json(&json!({"name": "Mercy General", "patientCount": 10, "location": "Springfield"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Mercy General");
    assert_eq!(updated["patientCount"], 10);

    // list reflects the update
    let res = c.get(format!("{}/hospitals", app.base_url)).send().await?;
    let list = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Mercy General");

    // delete returns an empty 204
    let res = c.delete(format!("{}/hospitals/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    // collection is empty again
    let res = c.get(format!("{}/hospitals", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_create_appends_with_incrementing_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/hospitals", app.base_url))
        .json(&json!({"name": "A", "patientCount": 1, "location": "X"}))
        .send()
        .await?;
    assert_eq!(res.json::<serde_json::Value>().await?["id"], 1);

    let res = c
        .post(format!("{}/hospitals", app.base_url))
        .json(&json!({"name": "B", "patientCount": 2, "location": "Y"}))
        .send()
        .await?;
    assert_eq!(res.json::<serde_json::Value>().await?["id"], 2);

    let list = c
        .get(format!("{}/hospitals", app.base_url))
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;
    assert_eq!(list.len(), 2);
    assert_eq!(list.last().map(|h| h["name"].clone()), Some(json!("B")));
    Ok(())
}

#[tokio::test]
async fn e2e_validation_rejections_leave_collection_unchanged() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // seed one valid record
    let res = c
        .post(format!("{}/hospitals", app.base_url))
        .json(&json!({"name": "Mercy", "patientCount": 5, "location": "Springfield"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let bad_payloads = [
        json!({"patientCount": 5, "location": "Springfield"}),
        json!({"name": null, "patientCount": 5, "location": "Springfield"}),
        json!({"name": "", "patientCount": 5, "location": "Springfield"}),
        json!({"name": "Mercy", "patientCount": 0, "location": "Springfield"}),
        json!({"name": "Mercy", "patientCount": 5, "location": ""}),
    ];
    for body in &bad_payloads {
        let res = c
            .post(format!("{}/hospitals", app.base_url))
            .json(body)
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "payload: {body}");
    }

    // update with a bad payload is rejected the same way
    let res = c
        .put(format!("{}/hospitals/1", app.base_url))
        .json(&json!({"name": "X", "patientCount": 0, "location": "Y"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let list = c
        .get(format!("{}/hospitals", app.base_url))
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Mercy");
    assert_eq!(list[0]["patientCount"], 5);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_id_is_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/hospitals", app.base_url))
        .json(&json!({"name": "Mercy", "patientCount": 5, "location": "Springfield"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c
        .put(format!("{}/hospitals/99", app.base_url))
        .json(&json!({"name": "X", "patientCount": 1, "location": "Y"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/hospitals/99", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let list = c
        .get(format!("{}/hospitals", app.base_url))
        .send()
        .await?
        .json::<Vec<serde_json::Value>>()
        .await?;
    assert_eq!(list.len(), 1);
    Ok(())
}
