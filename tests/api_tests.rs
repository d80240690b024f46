// tests/api_tests.rs

use sqlx::sqlite::SqlitePoolOptions;
use warbler::{config::Config, routes, state::AppState};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Create a private in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    // 2. Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    // 3. Create test configuration and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
    };

    let state = AppState { pool, config };

    // 4. Create the router with the app state
    let app = routes::create_router(state);

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Signs up a user and returns (token, user id).
async fn signup(client: &reqwest::Client, address: &str, username: &str) -> (String, i64) {
    let response = client
        .post(format!("{}/api/auth/signup", address))
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{}@email.com", username),
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().expect("Token not found").to_string();
    let id = body["user"]["id"].as_i64().expect("User id not found");
    (token, id)
}

#[tokio::test]
async fn unknown_route_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn signup_and_login() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/auth/signup", address))
        .json(&serde_json::json!({
            "username": "u1",
            "email": "u1@email.com",
            "password": "password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(
        response
            .headers()
            .get("cache-control")
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["username"], "u1");
    assert!(body["user"].get("password").is_none());

    let login = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"username": "u1", "password": "password"}))
        .send()
        .await
        .unwrap();
    assert_eq!(login.status().as_u16(), 200);
    let body: serde_json::Value = login.json().await.unwrap();
    assert!(body["token"].is_string());

    let bad_login = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"username": "u1", "password": "wrong-password"}))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_login.status().as_u16(), 401);
}

#[tokio::test]
async fn logout_requires_a_session() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, _id) = signup(&client, &address, "dave").await;

    let logged_out = client
        .post(format!("{}/api/auth/logout", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(logged_out.status().as_u16(), 204);

    let anonymous = client
        .post(format!("{}/api/auth/logout", address))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);
}

#[tokio::test]
async fn signup_validation_and_duplicates() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    signup(&client, &address, "u1").await;

    let invalid = client
        .post(format!("{}/api/auth/signup", address))
        .json(&serde_json::json!({
            "username": "u2",
            "email": "not-an-email",
            "password": "password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status().as_u16(), 400);

    let duplicate = client
        .post(format!("{}/api/auth/signup", address))
        .json(&serde_json::json!({
            "username": "u1",
            "email": "fresh@email.com",
            "password": "password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status().as_u16(), 409);
    let body: serde_json::Value = duplicate.json().await.unwrap();
    assert_eq!(body["error"], "Username already taken");
}

#[tokio::test]
async fn anonymous_access() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let users = client
        .get(format!("{}/api/users", address))
        .send()
        .await
        .unwrap();
    assert_eq!(users.status().as_u16(), 401);

    let feed = client
        .get(format!("{}/api/feed", address))
        .send()
        .await
        .unwrap();
    assert_eq!(feed.status().as_u16(), 200);
    let messages: Vec<serde_json::Value> = feed.json().await.unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn follow_post_like_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (token_a, _id_a) = signup(&client, &address, "alice").await;
    let (token_b, id_b) = signup(&client, &address, "bob").await;

    // Bob posts
    let posted = client
        .post(format!("{}/api/messages", address))
        .bearer_auth(&token_b)
        .json(&serde_json::json!({"text": "hello from bob"}))
        .send()
        .await
        .unwrap();
    assert_eq!(posted.status().as_u16(), 201);
    let message: serde_json::Value = posted.json().await.unwrap();
    let message_id = message["id"].as_i64().unwrap();

    // Alice follows Bob and sees the message
    let followed = client
        .post(format!("{}/api/users/follow/{}", address, id_b))
        .bearer_auth(&token_a)
        .send()
        .await
        .unwrap();
    assert_eq!(followed.status().as_u16(), 200);
    let following: Vec<serde_json::Value> = followed.json().await.unwrap();
    assert_eq!(following[0]["username"], "bob");

    let feed: Vec<serde_json::Value> = client
        .get(format!("{}/api/feed", address))
        .bearer_auth(&token_a)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["id"].as_i64(), Some(message_id));

    // Alice likes it; the author cannot like their own message
    let liked: serde_json::Value = client
        .post(format!("{}/api/messages/{}/like", address, message_id))
        .bearer_auth(&token_a)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(liked["liked"], true);

    let own_like = client
        .post(format!("{}/api/messages/{}/like", address, message_id))
        .bearer_auth(&token_b)
        .send()
        .await
        .unwrap();
    assert_eq!(own_like.status().as_u16(), 401);

    // Alice cannot delete Bob's message
    let foreign_delete = client
        .delete(format!("{}/api/messages/{}", address, message_id))
        .bearer_auth(&token_a)
        .send()
        .await
        .unwrap();
    assert_eq!(foreign_delete.status().as_u16(), 401);

    let profile: serde_json::Value = client
        .get(format!("{}/api/users/{}", address, id_b))
        .bearer_auth(&token_a)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["username"], "bob");
    assert_eq!(profile["messages_count"], 1);
    assert_eq!(profile["followers_count"], 1);

    // Unfollow empties the feed; a second unfollow still succeeds
    for _ in 0..2 {
        let unfollowed = client
            .post(format!("{}/api/users/stop-following/{}", address, id_b))
            .bearer_auth(&token_a)
            .send()
            .await
            .unwrap();
        assert_eq!(unfollowed.status().as_u16(), 200);
    }

    let feed: Vec<serde_json::Value> = client
        .get(format!("{}/api/feed", address))
        .bearer_auth(&token_a)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn edit_profile_and_delete_account() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (token, id) = signup(&client, &address, "carol").await;

    let wrong = client
        .put(format!("{}/api/users/profile", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "username": "carol2",
            "email": "carol@email.com",
            "password": "not-my-password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status().as_u16(), 401);

    let edited = client
        .put(format!("{}/api/users/profile", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "username": "carol2",
            "email": "carol@email.com",
            "bio": "Hello",
            "password": "password"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(edited.status().as_u16(), 200);
    let user: serde_json::Value = edited.json().await.unwrap();
    assert_eq!(user["username"], "carol2");
    assert_eq!(user["bio"], "Hello");

    let deleted = client
        .post(format!("{}/api/users/delete", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status().as_u16(), 204);

    // The old token no longer resolves to a user
    let after = client
        .get(format!("{}/api/users/{}", address, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(after.status().as_u16(), 401);
}
