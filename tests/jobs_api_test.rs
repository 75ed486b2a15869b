use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use afrijobs_backend::{routes, AppState};

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health::welcome))
        .route("/health", get(routes::health::health))
        .route("/api/jobs", get(routes::jobs::list_jobs))
        .route("/api/jobs/types", get(routes::jobs::list_job_types))
        .route("/api/jobs/tags", get(routes::jobs::list_job_tags))
        .route("/api/jobs/towns", get(routes::jobs::list_towns))
        .route("/api/jobs/:id", get(routes::jobs::get_job))
        .fallback(routes::not_found)
        .with_state(state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn listed_ids(body: &JsonValue) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["id"].as_i64().unwrap())
        .collect()
}

async fn seed(pool: &sqlx::PgPool) {
    sqlx::query("TRUNCATE job_tags, tags, jobs, companies, towns_by_region RESTART IDENTITY CASCADE")
        .execute(pool)
        .await
        .expect("truncate");

    sqlx::query(
        "INSERT INTO companies (id, name, logo_url) VALUES \
         (1, 'Acme Labs', 'https://cdn.example.com/acme.png'), \
         (2, 'Globex', NULL)",
    )
    .execute(pool)
    .await
    .expect("seed companies");

    sqlx::query(
        "INSERT INTO jobs (id, title, description, salary_min, salary_max, job_type, location, \
                           applicants_count, status, company_id, created_at) VALUES \
         (1, 'Backend Engineer', 'Rust services', 80000, 120000, 'Full-time', 'Lagos', 5, 'active', 1, NOW() - INTERVAL '3 days'), \
         (2, 'Frontend Developer', 'React dashboards', 60000, 90000, 'Contract', 'Accra', NULL, 'active', 2, NOW() - INTERVAL '2 days'), \
         (3, 'Data Analyst', 'Dashboards', 50000, 70000, 'Full-time', 'Nairobi', 2, 'archived', 1, NOW() - INTERVAL '4 days'), \
         (4, 'DevOps Engineer', NULL, NULL, NULL, NULL, NULL, NULL, 'active', NULL, NOW() - INTERVAL '1 day')",
    )
    .execute(pool)
    .await
    .expect("seed jobs");

    sqlx::query(
        "INSERT INTO tags (id, name) VALUES (1, 'rust'), (2, 'react'), (3, 'remote'), (4, 'sql')",
    )
    .execute(pool)
    .await
    .expect("seed tags");

    // Tag 'sql' is only attached to the archived job 3 and must never be
    // visible through the API.
    sqlx::query(
        "INSERT INTO job_tags (job_id, tag_id) VALUES (1, 1), (1, 3), (2, 2), (2, 3), (3, 1), (3, 4)",
    )
    .execute(pool)
    .await
    .expect("seed job_tags");

    sqlx::query(
        "INSERT INTO towns_by_region (region, town) VALUES \
         ('Greater Accra', 'Accra'), ('Lagos State', 'Ikeja')",
    )
    .execute(pool)
    .await
    .expect("seed towns");
}

#[tokio::test]
async fn jobs_api_end_to_end() {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("skipping jobs_api_end_to_end: DATABASE_URL not set");
        return;
    }

    afrijobs_backend::config::init_config().expect("init config");
    let pool = afrijobs_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    seed(&pool).await;

    let app = app(AppState::new(pool.clone()));

    // No filters: every active job, newest first, inactive job 3 absent.
    let (status, body) = get_json(&app, "/api/jobs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(listed_ids(&body), vec![4, 2, 1]);

    // Null columns hit the defaulting table.
    let bare = &body["data"][0];
    assert_eq!(bare["id"], 4);
    assert_eq!(bare["title"], "DevOps Engineer");
    assert_eq!(bare["company_name"], "");
    assert_eq!(bare["logo_url"], JsonValue::Null);
    assert_eq!(bare["salary"], "$0k-$0k");
    assert_eq!(bare["type"], "Full-time");
    assert_eq!(bare["applicants"], 0);
    assert_eq!(bare["description"], "");
    assert_eq!(bare["tags"].as_array().unwrap().len(), 0);

    // List-endpoint tags match the single-job resolution for the same id.
    let list_tags = body["data"][2]["tags"].clone();
    let (_, detail) = get_json(&app, "/api/jobs/1").await;
    assert_eq!(list_tags, detail["data"]["tags"]);

    // Salary bounds filter on the stored min/max columns; rows with null
    // salaries never satisfy a bound.
    let (_, body) = get_json(&app, "/api/jobs?minSalary=70000").await;
    assert_eq!(listed_ids(&body), vec![1]);
    let (_, body) = get_json(&app, "/api/jobs?maxSalary=95000").await;
    assert_eq!(listed_ids(&body), vec![2]);
    let (_, body) = get_json(&app, "/api/jobs?minSalary=60000&maxSalary=95000").await;
    assert_eq!(listed_ids(&body), vec![2]);

    // Tag membership is a union, and a job matching two requested tags
    // still appears once.
    let (_, body) = get_json(&app, "/api/jobs?tags=react,remote").await;
    assert_eq!(listed_ids(&body), vec![2, 1]);

    // Search is case-insensitive and reaches the company name.
    let (_, body) = get_json(&app, "/api/jobs?search=GLOBEX").await;
    assert_eq!(listed_ids(&body), vec![2]);
    let (_, body) = get_json(&app, "/api/jobs?search=rust").await;
    assert_eq!(listed_ids(&body), vec![1]);

    // Exact category match.
    let (_, body) = get_json(&app, "/api/jobs?type=Contract").await;
    assert_eq!(listed_ids(&body), vec![2]);

    // Derived views only see active jobs and come back sorted.
    let (_, body) = get_json(&app, "/api/jobs/types").await;
    assert_eq!(body["data"], serde_json::json!(["Contract", "Full-time"]));
    let (_, body) = get_json(&app, "/api/jobs/tags").await;
    assert_eq!(body["data"], serde_json::json!(["react", "remote", "rust"]));

    // Towns is a raw, unfiltered array with no envelope.
    let (status, body) = get_json(&app, "/api/jobs/towns").await;
    assert_eq!(status, StatusCode::OK);
    let towns = body.as_array().expect("raw array");
    assert_eq!(towns.len(), 2);
    assert_eq!(towns[0]["region"], "Greater Accra");

    // Single lookup: formatted job with tags.
    let (status, body) = get_json(&app, "/api/jobs/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["salary"], "$80k-$120k");
    assert_eq!(body["data"]["company_name"], "Acme Labs");
    assert_eq!(body["data"]["tags"], serde_json::json!(["remote", "rust"]));

    // Inactive and unknown ids are a 404, not a 500.
    let (status, body) = get_json(&app, "/api/jobs/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Job not found");
    let (status, _) = get_json(&app, "/api/jobs/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Negative salary bounds fail validation before any query runs.
    let (status, body) = get_json(&app, "/api/jobs?minSalary=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn unmatched_routes_echo_method_and_path() {
    let app = Router::new().fallback(routes::not_found);

    let request = Request::builder()
        .method("GET")
        .uri("/nope")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Cannot GET /nope");
}
