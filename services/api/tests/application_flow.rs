//! Application lifecycle tests against a live PostgreSQL instance
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` pointing at a
//! scratch database. Users and admins are seeded directly; in production
//! those rows come from the auth service over the same schema.

use api::AppState;
use api::middleware::{Claims, Role, TokenVerifier};
use api::repositories::{ApplicationRepository, EventRepository, SavedEventRepository};
use api::routes::create_router;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use common::database::{DatabaseConfig, init_pool, run_migrations};
use jsonwebtoken::{EncodingKey, Header, encode};
use mailer::Mailer;
use serde_json::{Value, json};
use sqlx::{PgPool, Row};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use uuid::Uuid;

const TEST_PRIVATE_KEY: &str = include_str!("fixtures/jwt_private.pem");
const TEST_PUBLIC_KEY: &str = include_str!("fixtures/jwt_public.pem");

async fn setup() -> Result<AppState, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    run_migrations(&pool).await?;

    Ok(AppState {
        db_pool: pool.clone(),
        event_repository: EventRepository::new(pool.clone()),
        application_repository: ApplicationRepository::new(pool.clone()),
        saved_repository: SavedEventRepository::new(pool),
        verifier: TokenVerifier::new(TEST_PUBLIC_KEY)?,
        mailer: Mailer::console(),
    })
}

fn token_for(id: Uuid, role: Role) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();
    encode(
        &Header::new(jsonwebtoken::Algorithm::RS256),
        &Claims {
            sub: id,
            role,
            iat: now,
            exp: now + 3600,
        },
        &EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY.as_bytes()).unwrap(),
    )
    .unwrap()
}

async fn seed_user(pool: &PgPool) -> Uuid {
    sqlx::query(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, 'x') RETURNING id",
    )
    .bind(format!("user_{}", &Uuid::new_v4().simple().to_string()[..8]))
    .bind(format!("user-{}@example.com", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .unwrap()
    .get("id")
}

async fn seed_admin(pool: &PgPool) -> Uuid {
    sqlx::query("INSERT INTO admins (email, password_hash) VALUES ($1, 'x') RETURNING id")
        .bind(format!("admin-{}@example.com", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap()
        .get("id")
}

/// Insert an event directly; `starts_in` controls the deadline state
async fn seed_event(pool: &PgPool, admin_id: Uuid, starts_in: Duration, slots: i32) -> Uuid {
    let start = Utc::now() + starts_in;
    sqlx::query(
        r#"
        INSERT INTO events (title, start_date, end_date, slots_total, created_by)
        VALUES ('Rust Hack Week', $1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(start)
    .bind(start + Duration::days(2))
    .bind(slots)
    .bind(admin_id)
    .fetch_one(pool)
    .await
    .unwrap()
    .get("id")
}

fn apply_body() -> Value {
    json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "phoneNumber": "+49123456",
        "institution": "TU Berlin",
        "skills": "rust, sql"
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer));
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn application_count(pool: &PgPool, user_id: Uuid, event_id: Uuid) -> i64 {
    sqlx::query("SELECT COUNT(*) AS n FROM applications WHERE user_id = $1 AND event_id = $2")
        .bind(user_id)
        .bind(event_id)
        .fetch_one(pool)
        .await
        .unwrap()
        .get("n")
}

#[tokio::test]
#[ignore] // Requires PostgreSQL running
async fn test_double_apply_stores_one_row() -> Result<(), Box<dyn std::error::Error>> {
    let state = setup().await?;
    let pool = state.db_pool.clone();
    let app = create_router(state);

    let admin_id = seed_admin(&pool).await;
    let user_id = seed_user(&pool).await;
    let event_id = seed_event(&pool, admin_id, Duration::days(10), 50).await;
    let token = token_for(user_id, Role::User);
    let uri = format!("/event/apply/{}", event_id);

    let (status, body) = send(&app, "POST", &uri, &token, Some(apply_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["applicationId"].is_string());

    let (status, _) = send(&app, "POST", &uri, &token, Some(apply_body())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(application_count(&pool, user_id, event_id).await, 1);

    Ok(())
}

#[tokio::test]
#[ignore] // Requires PostgreSQL running
async fn test_apply_after_deadline_is_closed_despite_free_slots()
-> Result<(), Box<dyn std::error::Error>> {
    let state = setup().await?;
    let pool = state.db_pool.clone();
    let app = create_router(state);

    let admin_id = seed_admin(&pool).await;
    let user_id = seed_user(&pool).await;
    // Starts in two hours: inside the 24h cutoff, with plenty of slots
    let event_id = seed_event(&pool, admin_id, Duration::hours(2), 100).await;
    let token = token_for(user_id, Role::User);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/event/apply/{}", event_id),
        &token,
        Some(apply_body()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Registration for this event is closed");

    Ok(())
}

#[tokio::test]
#[ignore] // Requires PostgreSQL running
async fn test_apply_to_unknown_event_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = setup().await?;
    let pool = state.db_pool.clone();
    let app = create_router(state);

    let user_id = seed_user(&pool).await;
    let token = token_for(user_id, Role::User);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/event/apply/{}", Uuid::new_v4()),
        &token,
        Some(apply_body()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
#[ignore] // Requires PostgreSQL running
async fn test_cancel_by_non_owner_is_forbidden() -> Result<(), Box<dyn std::error::Error>> {
    let state = setup().await?;
    let pool = state.db_pool.clone();
    let app = create_router(state);

    let admin_id = seed_admin(&pool).await;
    let owner_id = seed_user(&pool).await;
    let other_id = seed_user(&pool).await;
    let event_id = seed_event(&pool, admin_id, Duration::days(10), 50).await;

    let owner_token = token_for(owner_id, Role::User);
    let (status, body) = send(
        &app,
        "POST",
        &format!("/event/apply/{}", event_id),
        &owner_token,
        Some(apply_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let application_id = body["applicationId"].as_str().unwrap().to_string();
    let cancel_uri = format!("/user/application/cancel/{}", application_id);

    // A different user cannot cancel it, and the row survives
    let other_token = token_for(other_id, Role::User);
    let (status, _) = send(&app, "DELETE", &cancel_uri, &other_token, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(application_count(&pool, owner_id, event_id).await, 1);

    // The owner can
    let (status, _) = send(&app, "DELETE", &cancel_uri, &owner_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(application_count(&pool, owner_id, event_id).await, 0);

    // And a second cancel finds nothing
    let (status, _) = send(&app, "DELETE", &cancel_uri, &owner_token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
#[ignore] // Requires PostgreSQL running
async fn test_remaining_slots_track_live_applications() -> Result<(), Box<dyn std::error::Error>> {
    let state = setup().await?;
    let pool = state.db_pool.clone();
    let app = create_router(state);

    let admin_id = seed_admin(&pool).await;
    let event_id = seed_event(&pool, admin_id, Duration::days(10), 2).await;
    let detail_uri = format!("/user/allevents/{}", event_id);

    let first = seed_user(&pool).await;
    let first_token = token_for(first, Role::User);
    let (_, body) = send(&app, "GET", &detail_uri, &first_token, None).await;
    assert_eq!(body["event"]["slots"], 2);

    for _ in 0..2 {
        let user = seed_user(&pool).await;
        let token = token_for(user, Role::User);
        let (status, _) = send(
            &app,
            "POST",
            &format!("/event/apply/{}", event_id),
            &token,
            Some(apply_body()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, "GET", &detail_uri, &first_token, None).await;
    assert_eq!(body["event"]["slots"], 0);

    // Capacity is display-only: a full event with an open deadline still
    // accepts applications
    let (status, _) = send(
        &app,
        "POST",
        &format!("/event/apply/{}", event_id),
        &first_token,
        Some(apply_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, "GET", &detail_uri, &first_token, None).await;
    assert_eq!(body["event"]["slots"], 0, "clamped, never negative");

    Ok(())
}

#[tokio::test]
#[ignore] // Requires PostgreSQL running
async fn test_saved_mark_upsert_flow() -> Result<(), Box<dyn std::error::Error>> {
    let state = setup().await?;
    let pool = state.db_pool.clone();
    let app = create_router(state);

    let admin_id = seed_admin(&pool).await;
    let user_id = seed_user(&pool).await;
    let event_id = seed_event(&pool, admin_id, Duration::days(10), 10).await;
    let token = token_for(user_id, Role::User);
    let check_uri = format!("/user/saved/check/{}", event_id);

    let (_, body) = send(&app, "GET", &check_uri, &token, None).await;
    assert_eq!(body["isSaved"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/user/saved",
        &token,
        Some(json!({"eventId": event_id, "save": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event Saved");

    let (_, body) = send(&app, "GET", &check_uri, &token, None).await;
    assert_eq!(body["isSaved"], true);
    let (_, body) = send(&app, "GET", "/user/savedevents", &token, None).await;
    assert_eq!(body["events"].as_array().unwrap().len(), 1);

    // Un-saving flips the flag; the mark row stays behind
    let (status, body) = send(
        &app,
        "POST",
        "/user/saved",
        &token,
        Some(json!({"eventId": event_id, "save": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event Unsaved");

    let (_, body) = send(&app, "GET", &check_uri, &token, None).await;
    assert_eq!(body["isSaved"], false);
    let marks: i64 =
        sqlx::query("SELECT COUNT(*) AS n FROM saved_events WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .fetch_one(&pool)
            .await?
            .get("n");
    assert_eq!(marks, 1);

    // Saving an unknown event is a 404, not a stray FK error
    let (status, _) = send(
        &app,
        "POST",
        "/user/saved",
        &token,
        Some(json!({"eventId": Uuid::new_v4(), "save": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
#[ignore] // Requires PostgreSQL running
async fn test_admin_sees_applications_across_owned_events()
-> Result<(), Box<dyn std::error::Error>> {
    let state = setup().await?;
    let pool = state.db_pool.clone();
    let app = create_router(state);

    let admin_id = seed_admin(&pool).await;
    let other_admin_id = seed_admin(&pool).await;
    let first_event = seed_event(&pool, admin_id, Duration::days(10), 10).await;
    let second_event = seed_event(&pool, admin_id, Duration::days(20), 10).await;
    let foreign_event = seed_event(&pool, other_admin_id, Duration::days(10), 10).await;

    for event_id in [first_event, second_event, foreign_event] {
        let user = seed_user(&pool).await;
        let token = token_for(user, Role::User);
        let (status, _) = send(
            &app,
            "POST",
            &format!("/event/apply/{}", event_id),
            &token,
            Some(apply_body()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let admin_token = token_for(admin_id, Role::Admin);
    let (status, body) = send(&app, "GET", "/admin/applied-events", &admin_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalApplications"], 2);
    let applications = body["applications"].as_array().unwrap();
    assert_eq!(applications.len(), 2);
    assert!(applications.iter().all(|a| a["username"].is_string()));

    Ok(())
}

#[tokio::test]
#[ignore] // Requires PostgreSQL running
async fn test_event_mutation_restricted_to_owner() -> Result<(), Box<dyn std::error::Error>> {
    let state = setup().await?;
    let pool = state.db_pool.clone();
    let app = create_router(state);

    let owner_id = seed_admin(&pool).await;
    let other_id = seed_admin(&pool).await;
    let event_id = seed_event(&pool, owner_id, Duration::days(10), 10).await;

    let update = json!({
        "title": "Renamed Hack Week",
        "startDate": Utc::now() + Duration::days(12),
        "endDate": Utc::now() + Duration::days(14),
        "slotsTotal": 25
    });

    let other_token = token_for(other_id, Role::Admin);
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/events/{}", event_id),
        &other_token,
        Some(update.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let owner_token = token_for(owner_id, Role::Admin);
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/events/{}", event_id),
        &owner_token,
        Some(update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["event"]["title"], "Renamed Hack Week");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/events/{}", event_id),
        &other_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/events/{}", event_id),
        &owner_token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The cascade removed the event's applications with it
    let orphans: i64 = sqlx::query("SELECT COUNT(*) AS n FROM applications WHERE event_id = $1")
        .bind(event_id)
        .fetch_one(&pool)
        .await?
        .get("n");
    assert_eq!(orphans, 0);

    Ok(())
}
