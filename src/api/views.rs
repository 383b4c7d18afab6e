// JSON projections returned by the handlers. Public views expose a
// narrower field set than their admin counterparts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::{
    CartLine, Category, Order, OrderItem, Product, ProductWithCategory, User,
};
use crate::types::{Page, PageMeta};

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicCategoryView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for PublicCategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

/// Admin projection of a category is the full row
pub type AdminCategoryView = Category;

#[derive(Debug, Serialize)]
pub struct PublicProductView {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub category_id: i64,
    pub rating: Option<f64>,
}

impl From<Product> for PublicProductView {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            title: p.title,
            description: p.description,
            price: p.price,
            image: p.image,
            category_id: p.category_id,
            rating: p.rating,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryRef {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AdminProductView {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub category_id: i64,
    pub rating: Option<f64>,
    pub category: Option<CategoryRef>,
}

impl From<ProductWithCategory> for AdminProductView {
    fn from(row: ProductWithCategory) -> Self {
        let p = row.product;
        Self {
            id: p.id,
            name: p.name,
            title: p.title,
            description: p.description,
            price: p.price,
            image: p.image,
            category_id: p.category_id,
            rating: p.rating,
            category: row.category_name.map(|name| CategoryRef { name }),
        }
    }
}

/// `{"products": [...], "total", "pages", "current_page", "per_page"}`
#[derive(Debug, Serialize)]
pub struct ProductList<T: Serialize> {
    pub products: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl<T: Serialize> ProductList<T> {
    pub fn from_page<R>(page: Page<R>) -> Self
    where
        T: From<R>,
    {
        let meta = page.meta();
        Self {
            products: page.items.into_iter().map(T::from).collect(),
            meta,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartProductView {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub product: CartProductView,
}

impl From<CartLine> for CartLineView {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            quantity: line.quantity,
            product: CartProductView {
                id: line.product_id,
                name: line.name,
                title: line.title,
                price: line.price,
                image: line.image,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderItemView {
    pub product_id: Option<i64>,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
}

impl From<OrderItem> for OrderItemView {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            product_name: item.product_name,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: i64,
    pub status: String,
    pub total: f64,
    pub shipping_address: String,
    pub billing_address: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}

impl From<(Order, Vec<OrderItem>)> for OrderView {
    fn from((order, items): (Order, Vec<OrderItem>)) -> Self {
        Self {
            id: order.id,
            status: order.status,
            total: order.total,
            shipping_address: order.shipping_address,
            billing_address: order.billing_address,
            payment_method: order.payment_method,
            created_at: order.created_at,
            items: items.into_iter().map(OrderItemView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageRequest;

    #[test]
    fn product_list_flattens_pagination_metadata() {
        let product = Product {
            id: 1,
            name: "shoe".to_string(),
            title: "Red Shoe".to_string(),
            price: 9.5,
            category_id: 2,
            description: None,
            image: None,
            rating: Some(4.0),
        };
        let page = Page {
            items: vec![product],
            total: 11,
            request: PageRequest::new(Some(2), Some(10), 10, 100),
        };

        let body = serde_json::to_value(ProductList::<PublicProductView>::from_page(page)).unwrap();
        assert_eq!(body["total"], 11);
        assert_eq!(body["pages"], 2);
        assert_eq!(body["current_page"], 2);
        assert_eq!(body["products"][0]["title"], "Red Shoe");
        assert!(body["products"][0].get("category").is_none());
    }
}
