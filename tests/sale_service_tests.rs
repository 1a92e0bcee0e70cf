use bigdecimal::BigDecimal;
use bookstore_server_lib::data::database::Database;
use bookstore_server_lib::data::models::book::{Book, NewBook, UpdateBook};
use bookstore_server_lib::data::models::cart::NewCartEntry;
use bookstore_server_lib::data::models::user::{NewUser, User};
use bookstore_server_lib::data::repos::implementors::book_repo::BookRepo;
use bookstore_server_lib::data::repos::implementors::cart_repo::CartRepo;
use bookstore_server_lib::data::repos::implementors::sale_repo::SaleRepo;
use bookstore_server_lib::data::repos::implementors::user_repo::UserRepo;
use bookstore_server_lib::data::repos::traits::repository::Repository;
use bookstore_server_lib::services::cart_service::CartService;
use bookstore_server_lib::services::errors::SaleServiceError;
use bookstore_server_lib::services::sale_service::SaleService;
use chrono::NaiveDate;
use diesel_async::RunQueryDsl;
use std::str::FromStr;

async fn setup() -> Database {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::connect(&url).expect("Failed to create database connection pool");

    let mut conn = db.conn().await.expect("Failed to get a database connection");

    use bookstore_server_lib::data::models::schema::{
        books, cart_entries, sale_items, sales, users,
    };

    diesel::delete(sale_items::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear sale_items");
    diesel::delete(sales::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear sales");
    diesel::delete(cart_entries::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear cart_entries");
    diesel::delete(books::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear books");
    diesel::delete(users::table)
        .execute(&mut conn)
        .await
        .expect("Failed to clear users");

    db
}

async fn create_test_user(db: &Database, email: &str, author: bool) -> User {
    let repo = UserRepo::new(db.clone());

    let new_user = NewUser {
        name: "Test",
        surname: "Reader",
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        email,
        password_hash: "not-a-real-hash",
        active: true,
        deleted: false,
        author,
    };

    repo.add(new_user).await.expect("Failed to add user");

    repo.get_by_email(email)
        .await
        .expect("Failed to get user")
        .expect("User not found")
}

async fn create_test_book(
    db: &Database,
    author_id: i32,
    title: &str,
    stock: i32,
    price: &str,
) -> Book {
    let repo = BookRepo::new(db.clone());

    let new_book = NewBook {
        title,
        user_id: author_id,
        genre: "Fantasy",
        stock_quantity: stock,
        price: BigDecimal::from_str(price).unwrap(),
        description: "Test book",
        image_url: "http://example.com/cover.png",
        deleted: false,
    };

    repo.add(new_book).await.expect("Failed to add book");

    repo.get_by_title(title)
        .await
        .expect("Failed to get book")
        .expect("Book not found")
}

async fn stock_of(db: &Database, book_id: i32) -> i32 {
    BookRepo::new(db.clone())
        .get_by_id(book_id)
        .await
        .expect("Failed to get book")
        .expect("Book not found")
        .stock_quantity
}

async fn insert_raw_cart_entry(db: &Database, user_id: i32, book_id: i32, quantity: i32) {
    use bookstore_server_lib::data::models::schema::cart_entries;

    let mut conn = db.conn().await.expect("Failed to get a database connection");

    diesel::insert_into(cart_entries::table)
        .values(&NewCartEntry {
            user_id,
            book_id,
            quantity,
        })
        .execute(&mut conn)
        .await
        .expect("Failed to insert cart entry");
}

#[tokio::test]
#[serial_test::serial]
async fn test_checkout_cart_creates_sale_and_decrements_stock() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let buyer = create_test_user(&db, "buyer@test.com", false).await;
    let book = create_test_book(&db, author.user_id, "Dune", 10, "12.50").await;

    CartService::new(db.clone())
        .add_to_cart(book.book_id, buyer.user_id, 3)
        .await
        .expect("Add to cart failed");

    let service = SaleService::new(db.clone());
    let sale_id = service
        .checkout_cart(buyer.user_id)
        .await
        .expect("Checkout failed");

    assert_eq!(stock_of(&db, book.book_id).await, 7);

    let entries = CartRepo::new(db.clone())
        .get_entries_for_book(buyer.user_id, book.book_id)
        .await
        .expect("Failed to load entries");
    assert!(entries.is_empty(), "Consumed cart rows must be deleted");

    let repo = SaleRepo::new(db.clone());
    let sales = repo
        .get_by_buyer(buyer.user_id)
        .await
        .expect("Failed to load sales");
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].sale_id, sale_id);

    let with_items = repo
        .attach_items(sales)
        .await
        .expect("Failed to load sale items");
    let (_, items) = &with_items[0];
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].0.quantity, 3);
    assert_eq!(items[0].0.unit_price, BigDecimal::from_str("12.50").unwrap());
}

#[tokio::test]
#[serial_test::serial]
async fn test_checkout_cart_with_multiple_books() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let buyer = create_test_user(&db, "buyer@test.com", false).await;
    let dune = create_test_book(&db, author.user_id, "Dune", 10, "12.50").await;
    let hobbit = create_test_book(&db, author.user_id, "The Hobbit", 4, "8.00").await;

    let cart = CartService::new(db.clone());
    cart.add_to_cart(dune.book_id, buyer.user_id, 2)
        .await
        .expect("Add failed");
    cart.add_to_cart(hobbit.book_id, buyer.user_id, 1)
        .await
        .expect("Add failed");

    SaleService::new(db.clone())
        .checkout_cart(buyer.user_id)
        .await
        .expect("Checkout failed");

    assert_eq!(stock_of(&db, dune.book_id).await, 8);
    assert_eq!(stock_of(&db, hobbit.book_id).await, 3);

    let repo = SaleRepo::new(db.clone());
    let sales = repo
        .get_by_buyer(buyer.user_id)
        .await
        .expect("Failed to load sales");
    assert_eq!(sales.len(), 1, "One checkout creates exactly one sale");

    let with_items = repo
        .attach_items(sales)
        .await
        .expect("Failed to load sale items");
    assert_eq!(with_items[0].1.len(), 2);
}

#[tokio::test]
#[serial_test::serial]
async fn test_checkout_cart_aggregates_duplicate_rows() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let buyer = create_test_user(&db, "buyer@test.com", false).await;
    let book = create_test_book(&db, author.user_id, "Dune", 10, "12.50").await;

    insert_raw_cart_entry(&db, buyer.user_id, book.book_id, 2).await;
    insert_raw_cart_entry(&db, buyer.user_id, book.book_id, 3).await;

    SaleService::new(db.clone())
        .checkout_cart(buyer.user_id)
        .await
        .expect("Checkout failed");

    assert_eq!(stock_of(&db, book.book_id).await, 5);

    let repo = SaleRepo::new(db.clone());
    let sales = repo
        .get_by_buyer(buyer.user_id)
        .await
        .expect("Failed to load sales");
    let with_items = repo
        .attach_items(sales)
        .await
        .expect("Failed to load sale items");
    let (_, items) = &with_items[0];

    assert_eq!(items.len(), 1, "Duplicate rows merge into one item");
    assert_eq!(items[0].0.quantity, 5);
}

#[tokio::test]
#[serial_test::serial]
async fn test_checkout_empty_cart() {
    let db = setup().await;

    let buyer = create_test_user(&db, "buyer@test.com", false).await;

    let result = SaleService::new(db.clone()).checkout_cart(buyer.user_id).await;

    assert_eq!(result.err(), Some(SaleServiceError::EmptyCart));
}

#[tokio::test]
#[serial_test::serial]
async fn test_checkout_cart_insufficient_stock_rolls_back() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let first = create_test_user(&db, "first@test.com", false).await;
    let second = create_test_user(&db, "second@test.com", false).await;
    let book = create_test_book(&db, author.user_id, "Dune", 3, "12.50").await;

    let cart = CartService::new(db.clone());
    cart.add_to_cart(book.book_id, first.user_id, 2)
        .await
        .expect("Add failed");
    cart.add_to_cart(book.book_id, second.user_id, 2)
        .await
        .expect("Add failed");

    let service = SaleService::new(db.clone());

    service
        .checkout_cart(second.user_id)
        .await
        .expect("First checkout should succeed");
    assert_eq!(stock_of(&db, book.book_id).await, 1);

    // The remaining stock no longer covers the first user's cart.
    let result = service.checkout_cart(first.user_id).await;

    assert_eq!(
        result.err(),
        Some(SaleServiceError::InsufficientStock {
            title: "Dune".to_string(),
            available: 1,
            requested: 2,
        })
    );

    // Nothing from the failed checkout may be visible.
    assert_eq!(stock_of(&db, book.book_id).await, 1);

    let entries = CartRepo::new(db.clone())
        .get_entries_for_book(first.user_id, book.book_id)
        .await
        .expect("Failed to load entries");
    assert_eq!(entries.len(), 1, "Failed checkout must keep the cart");

    let sales = SaleRepo::new(db.clone())
        .get_by_buyer(first.user_id)
        .await
        .expect("Failed to load sales");
    assert!(sales.is_empty(), "Failed checkout must not record a sale");
}

#[tokio::test]
#[serial_test::serial]
async fn test_direct_checkout_sells_down_to_zero() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let buyer = create_test_user(&db, "buyer@test.com", false).await;
    let book = create_test_book(&db, author.user_id, "Dune", 1, "12.50").await;

    let service = SaleService::new(db.clone());

    service
        .checkout_direct(book.book_id, buyer.user_id)
        .await
        .expect("First direct checkout failed");
    assert_eq!(stock_of(&db, book.book_id).await, 0);

    let result = service.checkout_direct(book.book_id, buyer.user_id).await;

    assert_eq!(
        result.err(),
        Some(SaleServiceError::InsufficientStock {
            title: "Dune".to_string(),
            available: 0,
            requested: 1,
        })
    );

    let sales = SaleRepo::new(db.clone())
        .get_by_buyer(buyer.user_id)
        .await
        .expect("Failed to load sales");
    assert_eq!(sales.len(), 1, "Only the successful checkout is recorded");
}

#[tokio::test]
#[serial_test::serial]
async fn test_concurrent_direct_checkouts_of_last_copy() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let first = create_test_user(&db, "first@test.com", false).await;
    let second = create_test_user(&db, "second@test.com", false).await;
    let book = create_test_book(&db, author.user_id, "Dune", 1, "12.50").await;

    let service_a = SaleService::new(db.clone());
    let service_b = SaleService::new(db.clone());

    let (a, b) = tokio::join!(
        service_a.checkout_direct(book.book_id, first.user_id),
        service_b.checkout_direct(book.book_id, second.user_id),
    );

    assert!(
        a.is_ok() != b.is_ok(),
        "Exactly one of two concurrent checkouts of the last copy may succeed"
    );
    assert_eq!(stock_of(&db, book.book_id).await, 0);

    let repo = SaleRepo::new(db.clone());
    let mut all_sales = repo
        .get_by_buyer(first.user_id)
        .await
        .expect("Failed to load sales");
    all_sales.extend(
        repo.get_by_buyer(second.user_id)
            .await
            .expect("Failed to load sales"),
    );
    assert_eq!(all_sales.len(), 1);
}

#[tokio::test]
#[serial_test::serial]
async fn test_sale_items_keep_price_snapshot() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let buyer = create_test_user(&db, "buyer@test.com", false).await;
    let book = create_test_book(&db, author.user_id, "Dune", 5, "10.00").await;

    let service = SaleService::new(db.clone());
    service
        .checkout_direct(book.book_id, buyer.user_id)
        .await
        .expect("Checkout failed");

    // Raising the price afterwards must not rewrite sale history.
    let update = UpdateBook {
        price: Some(BigDecimal::from_str("20.00").unwrap()),
        ..Default::default()
    };
    BookRepo::new(db.clone())
        .update(book.book_id, update)
        .await
        .expect("Failed to update price");

    let listing = service
        .list_sales_and_purchases(buyer.user_id)
        .await
        .expect("Listing failed");

    assert_eq!(listing.purchases.len(), 1);
    assert_eq!(
        listing.purchases[0].total,
        BigDecimal::from_str("10.00").unwrap()
    );
    assert_eq!(
        listing.purchases[0].books[0].unit_price,
        BigDecimal::from_str("10.00").unwrap()
    );
}

#[tokio::test]
#[serial_test::serial]
async fn test_list_sales_and_purchases_separation() {
    let db = setup().await;

    let alice = create_test_user(&db, "alice@test.com", true).await;
    let bob = create_test_user(&db, "bob@test.com", true).await;
    let alices_book = create_test_book(&db, alice.user_id, "Dune", 5, "10.00").await;
    let bobs_book = create_test_book(&db, bob.user_id, "The Hobbit", 5, "8.00").await;

    let service = SaleService::new(db.clone());

    // Alice buys Bob's book, Bob buys Alice's book.
    service
        .checkout_direct(bobs_book.book_id, alice.user_id)
        .await
        .expect("Checkout failed");
    service
        .checkout_direct(alices_book.book_id, bob.user_id)
        .await
        .expect("Checkout failed");

    let listing = service
        .list_sales_and_purchases(alice.user_id)
        .await
        .expect("Listing failed");

    assert_eq!(listing.sales.len(), 1, "Alice sold one sale's worth");
    assert_eq!(listing.sales[0].items.len(), 1);
    assert_eq!(listing.sales[0].items[0].book_title, "Dune");
    assert_eq!(listing.sales[0].items[0].quantity, 1);
    assert_eq!(
        listing.sales[0].items[0].sale_total,
        BigDecimal::from_str("10.00").unwrap()
    );

    assert_eq!(listing.purchases.len(), 1, "Alice bought one sale's worth");
    assert_eq!(listing.purchases[0].books.len(), 1);
    assert_eq!(listing.purchases[0].books[0].title, "The Hobbit");
    assert_eq!(
        listing.purchases[0].total,
        BigDecimal::from_str("8.00").unwrap()
    );
}

#[tokio::test]
#[serial_test::serial]
async fn test_sales_grouped_by_sale_id() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let buyer = create_test_user(&db, "buyer@test.com", false).await;
    let dune = create_test_book(&db, author.user_id, "Dune", 10, "12.50").await;
    let hobbit = create_test_book(&db, author.user_id, "The Hobbit", 10, "8.00").await;

    let cart = CartService::new(db.clone());
    cart.add_to_cart(dune.book_id, buyer.user_id, 1)
        .await
        .expect("Add failed");
    cart.add_to_cart(hobbit.book_id, buyer.user_id, 2)
        .await
        .expect("Add failed");

    let service = SaleService::new(db.clone());
    service
        .checkout_cart(buyer.user_id)
        .await
        .expect("Checkout failed");
    service
        .checkout_direct(dune.book_id, buyer.user_id)
        .await
        .expect("Checkout failed");

    let listing = service
        .list_sales_and_purchases(author.user_id)
        .await
        .expect("Listing failed");

    assert_eq!(listing.sales.len(), 2, "One group per sale");

    // The cart checkout groups both of its lines under the same sale.
    let cart_group = &listing.sales[0];
    assert_eq!(cart_group.items.len(), 2);
    assert_eq!(cart_group.items[0].sale_id, cart_group.items[1].sale_id);
    assert_eq!(
        cart_group.items[0].sale_total,
        BigDecimal::from_str("28.50").unwrap()
    );

    let direct_group = &listing.sales[1];
    assert_eq!(direct_group.items.len(), 1);
}
