use crate::data::database::Database;
use crate::data::repos::implementors::sale_repo::{CheckoutTxError, SaleRepo};
use crate::services::errors::SaleServiceError;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use uuid::Uuid;

/// One sold line of a book the user authored, annotated with the totals of
/// the sale it belongs to.
#[derive(Debug, PartialEq)]
pub struct SoldLine {
    pub sale_id: String,
    pub book_title: String,
    pub sold_at: chrono::NaiveDateTime,
    pub sale_total: BigDecimal,
    pub quantity: i32,
}

/// Sold lines grouped under one sale, in item insertion order.
#[derive(Debug, PartialEq)]
pub struct SaleGroup {
    pub items: Vec<SoldLine>,
}

#[derive(Debug, PartialEq)]
pub struct PurchaseLine {
    pub book_id: i32,
    pub title: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

#[derive(Debug, PartialEq)]
pub struct Purchase {
    pub sale_id: String,
    pub purchased_at: chrono::NaiveDateTime,
    pub total_items: i32,
    pub total: BigDecimal,
    pub books: Vec<PurchaseLine>,
}

#[derive(Debug, PartialEq)]
pub struct SalesAndPurchases {
    pub sales: Vec<SaleGroup>,
    pub purchases: Vec<Purchase>,
}

pub struct SaleService {
    db: Database,
}

impl SaleService {
    pub fn new(db: Database) -> Self {
        SaleService { db }
    }

    /// Turns the buyer's cart into a sale. Returns the new sale's id.
    pub async fn checkout_cart(&self, buyer_id: i32) -> Result<String, SaleServiceError> {
        let sale_id = Uuid::new_v4().to_string();
        let sold_at = chrono::Utc::now().naive_utc();

        let repo = SaleRepo::new(self.db.clone());

        repo.checkout_from_cart(buyer_id, &sale_id, sold_at)
            .await
            .map_err(map_tx_error)?;

        Ok(sale_id)
    }

    /// Buys a single copy of one book, bypassing the cart.
    pub async fn checkout_direct(
        &self,
        book_id: i32,
        buyer_id: i32,
    ) -> Result<String, SaleServiceError> {
        let sale_id = Uuid::new_v4().to_string();
        let sold_at = chrono::Utc::now().naive_utc();

        let repo = SaleRepo::new(self.db.clone());

        repo.checkout_direct(book_id, buyer_id, &sale_id, sold_at)
            .await
            .map_err(map_tx_error)?;

        Ok(sale_id)
    }

    /// Two independent views over the sales tables: sales of books the user
    /// authored, grouped by sale, and purchases where the user is the
    /// buyer. Totals are computed on read from the price snapshots.
    pub async fn list_sales_and_purchases(
        &self,
        user_id: i32,
    ) -> Result<SalesAndPurchases, SaleServiceError> {
        let repo = SaleRepo::new(self.db.clone());

        let sold = repo
            .get_sold_items_by_author(user_id)
            .await
            .map_err(|_| SaleServiceError::DatabaseError)?;

        let mut sale_ids: Vec<String> = Vec::new();
        for (item, _) in &sold {
            if !sale_ids.contains(&item.sale_id) {
                sale_ids.push(item.sale_id.clone());
            }
        }

        let sales_by_id: HashMap<String, _> = repo
            .get_sales_by_ids(sale_ids.clone())
            .await
            .map_err(|_| SaleServiceError::DatabaseError)?
            .into_iter()
            .map(|s| (s.sale_id.clone(), s))
            .collect();

        let mut totals: HashMap<String, BigDecimal> = HashMap::new();
        let all_items = repo
            .get_items_for_sales(sale_ids.clone())
            .await
            .map_err(|_| SaleServiceError::DatabaseError)?;
        for item in all_items {
            let line = item.unit_price.clone() * BigDecimal::from(item.quantity);
            *totals
                .entry(item.sale_id.clone())
                .or_insert_with(|| BigDecimal::from(0)) += line;
        }

        let mut sales: Vec<SaleGroup> = Vec::new();
        let mut group_index: HashMap<String, usize> = HashMap::new();

        for (item, book) in sold {
            let sale = sales_by_id
                .get(&item.sale_id)
                .ok_or(SaleServiceError::DatabaseError)?;

            let line = SoldLine {
                sale_id: item.sale_id.clone(),
                book_title: book.title,
                sold_at: sale.sold_at,
                sale_total: totals
                    .get(&item.sale_id)
                    .cloned()
                    .unwrap_or_else(|| BigDecimal::from(0)),
                quantity: item.quantity,
            };

            match group_index.get(&item.sale_id) {
                Some(&i) => sales[i].items.push(line),
                None => {
                    group_index.insert(item.sale_id.clone(), sales.len());
                    sales.push(SaleGroup { items: vec![line] });
                }
            }
        }

        let bought = repo
            .get_by_buyer(user_id)
            .await
            .map_err(|_| SaleServiceError::DatabaseError)?;

        let with_items = repo
            .attach_items(bought)
            .await
            .map_err(|_| SaleServiceError::DatabaseError)?;

        let purchases = with_items
            .into_iter()
            .map(|(sale, items)| {
                let total = items.iter().fold(BigDecimal::from(0), |acc, (item, _)| {
                    acc + item.unit_price.clone() * BigDecimal::from(item.quantity)
                });
                let total_items = items.iter().map(|(item, _)| item.quantity).sum();

                let books = items
                    .into_iter()
                    .map(|(item, book)| PurchaseLine {
                        book_id: book.book_id,
                        title: book.title,
                        unit_price: item.unit_price,
                        quantity: item.quantity,
                    })
                    .collect();

                Purchase {
                    sale_id: sale.sale_id,
                    purchased_at: sale.sold_at,
                    total_items,
                    total,
                    books,
                }
            })
            .collect();

        Ok(SalesAndPurchases { sales, purchases })
    }
}

fn map_tx_error(e: CheckoutTxError) -> SaleServiceError {
    match e {
        CheckoutTxError::BookNotFound => SaleServiceError::BookNotFound,
        CheckoutTxError::EmptyCart => SaleServiceError::EmptyCart,
        CheckoutTxError::InsufficientStock {
            title,
            available,
            requested,
        } => SaleServiceError::InsufficientStock {
            title,
            available,
            requested,
        },
        CheckoutTxError::BookMismatch {
            cart_book_id,
            joined_book_id,
        } => SaleServiceError::DataIntegrity {
            cart_book_id,
            joined_book_id,
        },
        CheckoutTxError::Database(_) => SaleServiceError::DatabaseError,
    }
}
