mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

struct Catalog {
    shoe: i64,
    hat: i64,
}

async fn seed(app: &common::TestApp) -> Result<Catalog> {
    let admin = app.admin_token().await?;
    let category_id = app.create_category(&admin, "Apparel").await?;
    let shoe = app.create_product(&admin, category_id, "shoe", "Red Shoe", 19.99).await?;
    let hat = app.create_product(&admin, category_id, "hat", "Wool Hat", 5.5).await?;
    Ok(Catalog { shoe, hat })
}

fn checkout() -> Value {
    json!({
        "shipping_address": "1 Main St",
        "billing_address": "1 Main St",
        "payment_info": { "method": "card", "card_number": "4111111111111111" }
    })
}

#[tokio::test]
async fn adding_same_product_twice_increments_quantity() -> Result<()> {
    let app = common::spawn_app().await?;
    let catalog = seed(&app).await?;
    let user = app.user_token().await?;

    let res = app
        .post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.shoe }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let first: Value = res.json().await?;
    assert_eq!(first["quantity"], 1);

    let res = app
        .post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.shoe, "quantity": 2 }))
        .send()
        .await?;
    let second: Value = res.json().await?;
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["quantity"], 3);

    let cart: Value = app.get("/cart").bearer_auth(&user).send().await?.json().await?;
    let lines = cart.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 3);
    assert_eq!(lines[0]["product"]["title"], "Red Shoe");
    assert_eq!(lines[0]["product"]["price"], 19.99);
    Ok(())
}

#[tokio::test]
async fn cart_rejects_bad_input() -> Result<()> {
    let app = common::spawn_app().await?;
    let catalog = seed(&app).await?;
    let user = app.user_token().await?;

    let res = app
        .post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": 999 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.hat, "quantity": 0 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.get("/cart").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn cart_quantity_is_capped() -> Result<()> {
    let app = common::spawn_app().await?;
    let catalog = seed(&app).await?;
    let user = app.user_token().await?;

    let res = app
        .post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.shoe, "quantity": i64::MAX }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.shoe, "quantity": 1000 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let item_id = res.json::<Value>().await?["id"].as_i64().unwrap();

    // Growing the line past the cap is refused and leaves it as it was
    let res = app
        .post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.shoe, "quantity": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Quantity cannot exceed 1000");

    let res = app
        .put(&format!("/cart/{}", item_id))
        .bearer_auth(&user)
        .json(&json!({ "quantity": 1001 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.get("/cart").bearer_auth(&user).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let cart: Value = res.json().await?;
    assert_eq!(cart[0]["quantity"], 1000);

    let res = app.post("/orders").bearer_auth(&user).json(&checkout()).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn deleting_a_product_empties_carts_but_keeps_order_history() -> Result<()> {
    let app = common::spawn_app().await?;
    let catalog = seed(&app).await?;
    let admin = app.login(common::ADMIN_EMAIL, common::PASSWORD).await?;
    let user = app.user_token().await?;

    app.post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.shoe, "quantity": 2 }))
        .send()
        .await?;
    let res = app.post("/orders").bearer_auth(&user).json(&checkout()).send().await?;
    let order_id = res.json::<Value>().await?["id"].as_i64().unwrap();

    app.post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.shoe }))
        .send()
        .await?;

    let res = app
        .delete(&format!("/admin/products/{}", catalog.shoe))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cart: Value = app.get("/cart").bearer_auth(&user).send().await?.json().await?;
    assert_eq!(cart, json!([]));

    let order: Value = app
        .get(&format!("/orders/{}", order_id))
        .bearer_auth(&user)
        .send()
        .await?
        .json()
        .await?;
    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_id"], Value::Null);
    assert_eq!(items[0]["product_name"], "Red Shoe");
    assert_eq!(items[0]["unit_price"], 19.99);
    assert_eq!(items[0]["quantity"], 2);
    Ok(())
}

#[tokio::test]
async fn cart_items_are_scoped_to_their_owner() -> Result<()> {
    let app = common::spawn_app().await?;
    let catalog = seed(&app).await?;
    let user = app.user_token().await?;
    app.create_user("other@shop.test", common::PASSWORD, false).await?;
    let other = app.login("other@shop.test", common::PASSWORD).await?;

    let res = app
        .post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.hat }))
        .send()
        .await?;
    let item_id = res.json::<Value>().await?["id"].as_i64().unwrap();

    let res = app
        .put(&format!("/cart/{}", item_id))
        .bearer_auth(&other)
        .json(&json!({ "quantity": 9 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .delete(&format!("/cart/{}", item_id))
        .bearer_auth(&other)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .put(&format!("/cart/{}", item_id))
        .bearer_auth(&user)
        .json(&json!({ "quantity": 4 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cart: Value = app.get("/cart").bearer_auth(&user).send().await?.json().await?;
    assert_eq!(cart[0]["quantity"], 4);

    let res = app
        .delete(&format!("/cart/{}", item_id))
        .bearer_auth(&user)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cart: Value = app.get("/cart").bearer_auth(&user).send().await?.json().await?;
    assert_eq!(cart, json!([]));
    Ok(())
}

#[tokio::test]
async fn checkout_snapshots_cart_and_clears_it() -> Result<()> {
    let app = common::spawn_app().await?;
    let catalog = seed(&app).await?;
    let user = app.user_token().await?;

    for (product_id, quantity) in [(catalog.shoe, 2), (catalog.hat, 1)] {
        app.post("/cart")
            .bearer_auth(&user)
            .json(&json!({ "product_id": product_id, "quantity": quantity }))
            .send()
            .await?;
    }

    let res = app.post("/orders").bearer_auth(&user).json(&checkout()).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let placed: Value = res.json().await?;
    assert_eq!(placed["total"], 45.48);
    let order_id = placed["id"].as_i64().unwrap();

    let cart: Value = app.get("/cart").bearer_auth(&user).send().await?.json().await?;
    assert_eq!(cart, json!([]));

    let order: Value = app
        .get(&format!("/orders/{}", order_id))
        .bearer_auth(&user)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_method"], "card");
    assert!(order.get("payment_info").is_none());
    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_name"], "Red Shoe");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["unit_price"], 19.99);

    // Second checkout has nothing to buy
    let res = app.post("/orders").bearer_auth(&user).json(&checkout()).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn order_history_is_private_and_newest_first() -> Result<()> {
    let app = common::spawn_app().await?;
    let catalog = seed(&app).await?;
    let user = app.user_token().await?;

    let mut placed = Vec::new();
    for product_id in [catalog.shoe, catalog.hat] {
        app.post("/cart")
            .bearer_auth(&user)
            .json(&json!({ "product_id": product_id }))
            .send()
            .await?;
        let res = app.post("/orders").bearer_auth(&user).json(&checkout()).send().await?;
        placed.push(res.json::<Value>().await?["id"].as_i64().unwrap());
    }

    let history: Value = app.get("/orders").bearer_auth(&user).send().await?.json().await?;
    let orders = history["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], placed[1]);
    assert_eq!(orders[1]["id"], placed[0]);

    app.create_user("other@shop.test", common::PASSWORD, false).await?;
    let other = app.login("other@shop.test", common::PASSWORD).await?;

    let res = app
        .get(&format!("/orders/{}", placed[0]))
        .bearer_auth(&other)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let history: Value = app.get("/orders").bearer_auth(&other).send().await?.json().await?;
    assert_eq!(history["orders"], json!([]));
    Ok(())
}

#[tokio::test]
async fn checkout_requires_addresses_and_method() -> Result<()> {
    let app = common::spawn_app().await?;
    let catalog = seed(&app).await?;
    let user = app.user_token().await?;
    app.post("/cart")
        .bearer_auth(&user)
        .json(&json!({ "product_id": catalog.hat }))
        .send()
        .await?;

    let res = app
        .post("/orders")
        .bearer_auth(&user)
        .json(&json!({ "shipping_address": "1 Main St" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Required fields: billing_address, payment_info.method");

    // The rejected checkout left the cart untouched
    let cart: Value = app.get("/cart").bearer_auth(&user).send().await?.json().await?;
    assert_eq!(cart.as_array().unwrap().len(), 1);
    Ok(())
}
