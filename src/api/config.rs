use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: u64,
}

impl Config {
    /// Reads the configuration from the environment once at startup. The
    /// loaded value is passed down explicitly; nothing here is global.
    pub fn load() -> Self {
        dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let bind_addr =
            std::env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let jwt_expiration_minutes = std::env::var("JWT_EXPIRATION_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .expect("JWT_EXPIRATION_MINUTES must be a valid u64");

        tracing::info!("Config loaded");

        Config {
            database_url,
            bind_addr,
            jwt_secret,
            jwt_expiration_minutes,
        }
    }
}
