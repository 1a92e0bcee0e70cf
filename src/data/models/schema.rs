diesel::table! {
    books (book_id) {
        book_id -> Integer,
        #[max_length = 200]
        title -> Varchar,
        user_id -> Integer,
        #[max_length = 100]
        genre -> Varchar,
        stock_quantity -> Integer,
        price -> Decimal,
        #[max_length = 250]
        description -> Varchar,
        #[max_length = 255]
        image_url -> Varchar,
        deleted -> Bool,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    cart_entries (cart_entry_id) {
        cart_entry_id -> Integer,
        user_id -> Integer,
        book_id -> Integer,
        quantity -> Integer,
    }
}

diesel::table! {
    sale_items (sale_item_id) {
        sale_item_id -> Integer,
        #[max_length = 36]
        sale_id -> Varchar,
        book_id -> Integer,
        quantity -> Integer,
        unit_price -> Decimal,
    }
}

diesel::table! {
    sales (sale_id) {
        #[max_length = 36]
        sale_id -> Varchar,
        buyer_id -> Integer,
        sold_at -> Timestamp,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> Integer,
        #[max_length = 100]
        name -> Varchar,
        #[max_length = 100]
        surname -> Varchar,
        birth_date -> Date,
        #[max_length = 256]
        email -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        active -> Bool,
        deleted -> Bool,
        author -> Bool,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::joinable!(books -> users (user_id));
diesel::joinable!(cart_entries -> books (book_id));
diesel::joinable!(cart_entries -> users (user_id));
diesel::joinable!(sale_items -> books (book_id));
diesel::joinable!(sale_items -> sales (sale_id));
diesel::joinable!(sales -> users (buyer_id));

diesel::allow_tables_to_appear_in_same_query!(
    books,
    cart_entries,
    sale_items,
    sales,
    users,
);
