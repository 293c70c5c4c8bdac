//! Shared application state handed to every handler.

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::accounts::service::AccountsService;
use crate::auth::token::TokenService;
use crate::config::AppConfig;
use crate::offers::service::OffersService;
use crate::orders::service::OrdersService;
use crate::profiles::service::ProfilesService;
use crate::reviews::service::ReviewsService;
use crate::stats::service::StatsService;

#[derive(Debug, Clone, Copy)]
pub struct PaginationDefaults {
    pub page_size: u64,
    pub max_page_size: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenService,
    pub pagination: PaginationDefaults,
    pub accounts: AccountsService,
    pub profiles: ProfilesService,
    pub offers: OffersService,
    pub orders: OrdersService,
    pub reviews: ReviewsService,
    pub stats: StatsService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_secs);
        Self {
            accounts: AccountsService::new(db.clone(), tokens.clone()),
            profiles: ProfilesService::new(db.clone()),
            offers: OffersService::new(db.clone()),
            orders: OrdersService::new(db.clone()),
            reviews: ReviewsService::new(db.clone()),
            stats: StatsService::new(db.clone()),
            pagination: PaginationDefaults {
                page_size: config.server.page_size,
                max_page_size: config.server.max_page_size,
            },
            tokens,
            db,
        }
    }
}

// Lets the `CurrentUser` extractor pull the token verifier out of state.
impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
