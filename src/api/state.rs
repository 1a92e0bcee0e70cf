use crate::api::config::Config;
use crate::data::database::Database;

/// Shared per-process state handed to every handler. Both members are
/// cheap clones around the underlying pool/config.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}
