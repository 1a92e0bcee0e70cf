use crate::services::sale_service::{
    Purchase, PurchaseLine, SaleGroup, SalesAndPurchases, SoldLine,
};
use bigdecimal::BigDecimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub sale_id: String,
}

#[derive(Serialize)]
pub struct SoldItemResponse {
    pub id: String,
    pub book_title: String,
    pub sold_at: String,
    pub sale_total: BigDecimal,
    pub quantity: i32,
}

impl From<SoldLine> for SoldItemResponse {
    fn from(line: SoldLine) -> Self {
        Self {
            id: line.sale_id,
            book_title: line.book_title,
            sold_at: line.sold_at.to_string(),
            sale_total: line.sale_total,
            quantity: line.quantity,
        }
    }
}

#[derive(Serialize)]
pub struct SaleGroupResponse {
    pub sale: Vec<SoldItemResponse>,
}

impl From<SaleGroup> for SaleGroupResponse {
    fn from(group: SaleGroup) -> Self {
        Self {
            sale: group.items.into_iter().map(SoldItemResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct PurchasedBookResponse {
    pub book_id: i32,
    pub title: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl From<PurchaseLine> for PurchasedBookResponse {
    fn from(line: PurchaseLine) -> Self {
        Self {
            book_id: line.book_id,
            title: line.title,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

#[derive(Serialize)]
pub struct PurchaseResponse {
    pub id: String,
    pub purchased_at: String,
    pub total_items: i32,
    pub total: BigDecimal,
    pub books: Vec<PurchasedBookResponse>,
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.sale_id,
            purchased_at: purchase.purchased_at.to_string(),
            total_items: purchase.total_items,
            total: purchase.total,
            books: purchase
                .books
                .into_iter()
                .map(PurchasedBookResponse::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct SalesAndPurchasesResponse {
    pub sales: Vec<SaleGroupResponse>,
    pub purchases: Vec<PurchaseResponse>,
}

impl From<SalesAndPurchases> for SalesAndPurchasesResponse {
    fn from(listing: SalesAndPurchases) -> Self {
        Self {
            sales: listing
                .sales
                .into_iter()
                .map(SaleGroupResponse::from)
                .collect(),
            purchases: listing
                .purchases
                .into_iter()
                .map(PurchaseResponse::from)
                .collect(),
        }
    }
}
