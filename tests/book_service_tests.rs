use bigdecimal::BigDecimal;
use bookstore_server_lib::data::database::Database;
use bookstore_server_lib::data::models::book::{Book, UpdateBook};
use bookstore_server_lib::data::models::user::{NewUser, User};
use bookstore_server_lib::data::repos::implementors::book_repo::BookRepo;
use bookstore_server_lib::data::repos::implementors::user_repo::UserRepo;
use bookstore_server_lib::data::repos::traits::repository::Repository;
use bookstore_server_lib::services::book_service::BookService;
use bookstore_server_lib::services::errors::BookServiceError;
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
        surname: "Writer",
        birth_date: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
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

async fn create_book_for(db: &Database, service: &BookService, user: &User, title: &str) -> Book {
    service
        .create_book(
            title,
            "Fantasy",
            5,
            BigDecimal::from_str("10.00").unwrap(),
            "Test book",
            "http://example.com/cover.png",
            user,
        )
        .await
        .expect("Failed to create book");

    BookRepo::new(db.clone())
        .get_by_title(title)
        .await
        .expect("Failed to get book")
        .expect("Book not found")
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_book_requires_author_flag() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let reader = create_test_user(&db, "reader@test.com", false).await;

    let service = BookService::new(db.clone());

    let created = service
        .create_book(
            "Dune",
            "Science Fiction",
            5,
            BigDecimal::from_str("12.50").unwrap(),
            "Spice and sand",
            "http://example.com/dune.png",
            &author,
        )
        .await;
    assert!(created.is_ok());

    let denied = service
        .create_book(
            "Fanfic",
            "Fantasy",
            1,
            BigDecimal::from_str("1.00").unwrap(),
            "Should not exist",
            "http://example.com/nope.png",
            &reader,
        )
        .await;
    assert_eq!(denied.err(), Some(BookServiceError::PermissionDenied));
}

#[tokio::test]
#[serial_test::serial]
async fn test_update_book_owner_only() {
    let db = setup().await;

    let owner = create_test_user(&db, "owner@test.com", true).await;
    let other_author = create_test_user(&db, "other@test.com", true).await;
    let reader = create_test_user(&db, "reader@test.com", false).await;

    let service = BookService::new(db.clone());
    let book = create_book_for(&db, &service, &owner, "Dune").await;

    let update = UpdateBook {
        title: Some("Dune Messiah"),
        ..Default::default()
    };
    service
        .update_book(book.book_id, update, &owner)
        .await
        .expect("Owner update failed");

    let updated = service
        .get_book_by_id(book.book_id)
        .await
        .expect("Failed to get book")
        .expect("Book not found");
    assert_eq!(updated.title, "Dune Messiah");

    let update = UpdateBook {
        title: Some("Hijacked"),
        ..Default::default()
    };
    assert_eq!(
        service
            .update_book(book.book_id, update, &other_author)
            .await
            .err(),
        Some(BookServiceError::PermissionDenied)
    );

    let update = UpdateBook {
        title: Some("Hijacked"),
        ..Default::default()
    };
    assert_eq!(
        service.update_book(book.book_id, update, &reader).await.err(),
        Some(BookServiceError::PermissionDenied)
    );
}

#[tokio::test]
#[serial_test::serial]
async fn test_update_missing_book() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;

    let service = BookService::new(db.clone());

    let update = UpdateBook {
        title: Some("Ghost"),
        ..Default::default()
    };
    assert_eq!(
        service.update_book(4242, update, &author).await.err(),
        Some(BookServiceError::BookNotFound)
    );
}

#[tokio::test]
#[serial_test::serial]
async fn test_delete_book_is_soft() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;

    let service = BookService::new(db.clone());
    let book = create_book_for(&db, &service, &author, "Dune").await;

    service
        .delete_book(book.book_id, &author)
        .await
        .expect("Delete failed");

    // Point lookups and listings no longer see the book.
    assert!(
        service
            .get_book_by_id(book.book_id)
            .await
            .expect("Lookup failed")
            .is_none()
    );

    let page = service
        .get_book_page(1, 10, None, None)
        .await
        .expect("Listing failed");
    assert_eq!(page.total, 0);

    let all = BookRepo::new(db.clone())
        .get_all()
        .await
        .expect("Failed to list books");
    assert!(all.is_none(), "Soft-deleted books are not listed");

    // The row itself survives with the flag set.
    let raw = BookRepo::new(db.clone())
        .get_by_title("Dune")
        .await
        .expect("Failed to get book")
        .expect("Row must still exist");
    assert!(raw.deleted);
}

#[tokio::test]
#[serial_test::serial]
async fn test_book_page_pagination_and_filter() {
    let db = setup().await;

    let author = create_test_user(&db, "author@test.com", true).await;
    let other = create_test_user(&db, "other@test.com", true).await;

    let service = BookService::new(db.clone());
    create_book_for(&db, &service, &author, "Dune").await;
    create_book_for(&db, &service, &author, "Dune Messiah").await;
    create_book_for(&db, &service, &other, "The Hobbit").await;

    let page = service
        .get_book_page(1, 2, None, None)
        .await
        .expect("Listing failed");
    assert_eq!(page.books.len(), 2);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);

    let page_two = service
        .get_book_page(2, 2, None, None)
        .await
        .expect("Listing failed");
    assert_eq!(page_two.books.len(), 1);

    let filtered = service
        .get_book_page(1, 10, Some("Dune"), None)
        .await
        .expect("Listing failed");
    assert_eq!(filtered.total, 2);

    let by_author = service
        .get_book_page(1, 10, None, Some(other.user_id))
        .await
        .expect("Listing failed");
    assert_eq!(by_author.total, 1);
    assert_eq!(by_author.books[0].title, "The Hobbit");
}
