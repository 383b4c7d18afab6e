mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

/// Every admin-scoped route with a payload that would be valid for an admin
fn admin_routes(category_id: i64, product_id: i64) -> Vec<(Method, String, Option<Value>)> {
    vec![
        (Method::GET, "/admin/users".to_string(), None),
        (Method::GET, "/admin/categories".to_string(), None),
        (
            Method::POST,
            "/admin/categories".to_string(),
            Some(json!({ "name": "Hats" })),
        ),
        (Method::GET, format!("/admin/categories/{}", category_id), None),
        (
            Method::PUT,
            format!("/admin/categories/{}", category_id),
            Some(json!({ "name": "Renamed" })),
        ),
        (Method::DELETE, format!("/admin/categories/{}", category_id), None),
        (Method::GET, "/admin/products".to_string(), None),
        (
            Method::POST,
            "/admin/products".to_string(),
            Some(json!({ "name": "hat", "title": "Hat", "price": 5.0, "category_id": category_id })),
        ),
        (Method::GET, format!("/admin/products/{}", product_id), None),
        (
            Method::PUT,
            format!("/admin/products/{}", product_id),
            Some(json!({ "price": 1.0 })),
        ),
        (Method::DELETE, format!("/admin/products/{}", product_id), None),
    ]
}

#[tokio::test]
async fn non_admin_is_forbidden_everywhere() -> Result<()> {
    let app = common::spawn_app().await?;
    let admin = app.admin_token().await?;
    let user = app.user_token().await?;

    let category_id = app.create_category(&admin, "Shoes").await?;
    let product_id = app
        .create_product(&admin, category_id, "shoe", "Red Shoe", 10.0)
        .await?;

    for (method, path, body) in admin_routes(category_id, product_id) {
        let mut request = app
            .client
            .request(method.clone(), app.url(&path))
            .bearer_auth(&user);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let res = request.send().await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{} {}", method, path);
        let body: Value = res.json().await?;
        assert_eq!(body["message"], "Admin access required", "{} {}", method, path);
    }

    // Nothing changed behind the refusals
    let res = app
        .get(&format!("/admin/products/{}", product_id))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let product: Value = res.json().await?;
    assert_eq!(product["price"], 10.0);

    let res = app.get("/admin/categories").bearer_auth(&admin).send().await?;
    let body: Value = res.json().await?;
    assert_eq!(body["categories"].as_array().unwrap().len(), 1);
    assert_eq!(body["categories"][0]["name"], "Shoes");
    Ok(())
}

#[tokio::test]
async fn non_admin_is_forbidden_even_with_garbage_payload() -> Result<()> {
    let app = common::spawn_app().await?;
    let user = app.user_token().await?;

    let res = app
        .post("/admin/products")
        .bearer_auth(&user)
        .header("content-type", "application/json")
        .body("{definitely not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_a_token() -> Result<()> {
    let app = common::spawn_app().await?;

    for (method, path, _) in admin_routes(1, 1) {
        let res = app.client.request(method.clone(), app.url(&path)).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, path);
    }
    Ok(())
}

#[tokio::test]
async fn token_of_deleted_user_is_forbidden() -> Result<()> {
    let app = common::spawn_app().await?;
    let admin = app.admin_token().await?;

    sqlx::query("DELETE FROM users WHERE email = ?")
        .bind(common::ADMIN_EMAIL)
        .execute(&app.pool)
        .await?;

    let res = app.get("/admin/users").bearer_auth(&admin).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_login_distinguishes_non_admins() -> Result<()> {
    let app = common::spawn_app().await?;
    app.create_user(common::ADMIN_EMAIL, common::PASSWORD, true).await?;
    app.create_user(common::USER_EMAIL, common::PASSWORD, false).await?;

    let res = app
        .post("/admin/login")
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": common::PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["access_token"].as_str().unwrap().to_string();

    let res = app.get("/admin/users").bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["users"].as_array().unwrap().len(), 2);

    let res = app
        .post("/admin/login")
        .json(&json!({ "email": common::USER_EMAIL, "password": common::PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .post("/admin/login")
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": "nope-nope" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.post("/admin/login").json(&json!({})).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
