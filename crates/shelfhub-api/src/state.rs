//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use shelfhub_auth::{JwtDecoder, JwtEncoder, LocationAccess, PasswordHasher, SessionManager};
use shelfhub_core::config::AppConfig;
use shelfhub_core::error::AppError;
use shelfhub_database::repositories::{
    BookRepository, CaseRepository, CatalogRepository, LocationRepository, MovieRepository,
    MusicRepository, RefreshTokenRepository, ShelfRepository, ShowRepository, UserRepository,
};
use shelfhub_database::store::{CaseStore, LocationStore, RefreshTokenStore, ShelfStore, UserStore};
use shelfhub_database::{DatabasePool, MemoryStore};
use shelfhub_service::{
    CaseService, CatalogService, LocationService, ShelfService, UserService,
};

/// The stores behind users, locations, and sessions.
#[derive(Debug, Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub locations: Arc<dyn LocationStore>,
    pub tokens: Arc<dyn RefreshTokenStore>,
}

impl Stores {
    /// Postgres repositories over `pool`.
    pub fn postgres(pool: &DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            locations: Arc::new(LocationRepository::new(pg.clone())),
            tokens: Arc::new(RefreshTokenRepository::new(pg)),
        }
    }

    /// One in-memory store serving all three roles.
    pub fn memory(store: &MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            locations: Arc::new(store.clone()),
            tokens: Arc::new(store.clone()),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// Access token validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Login / refresh / revoke lifecycle
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    pub user_service: Arc<UserService>,
    pub location_service: Arc<LocationService>,
    pub case_service: Arc<CaseService>,
    pub shelf_service: Arc<ShelfService>,
    pub book_service: Arc<CatalogService<BookRepository>>,
    pub movie_service: Arc<CatalogService<MovieRepository>>,
    pub music_service: Arc<CatalogService<MusicRepository>>,
    pub show_service: Arc<CatalogService<ShowRepository>>,
}

impl AppState {
    /// Wires every service from configuration, a pool for the catalog
    /// tables, and the identity/location/session stores.
    pub fn new(config: AppConfig, db_pool: DatabasePool, stores: Stores) -> Result<Self, AppError> {
        let pg = db_pool.pool().clone();

        let password_hasher = Arc::new(PasswordHasher::new()?);
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&jwt_encoder),
            Arc::clone(&stores.users),
            Arc::clone(&stores.tokens),
            Arc::clone(&password_hasher),
            &config.auth,
        ));

        let access = Arc::new(LocationAccess::new(Arc::clone(&stores.locations)));
        // Cases and shelves share the pool with the item tables they key.
        let case_repo: Arc<dyn CaseStore> = Arc::new(CaseRepository::new(pg.clone()));
        let shelf_repo: Arc<dyn ShelfStore> = Arc::new(ShelfRepository::new(pg.clone()));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.locations),
            Arc::clone(&password_hasher),
        ));
        let location_service = Arc::new(LocationService::new(
            Arc::clone(&stores.locations),
            Arc::clone(&stores.users),
            Arc::clone(&access),
        ));
        let case_service = Arc::new(CaseService::new(Arc::clone(&case_repo), Arc::clone(&access)));
        let shelf_service = Arc::new(ShelfService::new(
            Arc::clone(&shelf_repo),
            Arc::clone(&case_repo),
            Arc::clone(&access),
        ));

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            jwt_decoder,
            session_manager,
            user_service,
            location_service,
            case_service,
            shelf_service,
            book_service: Arc::new(catalog_service(
                BookRepository::new(pg.clone()),
                &shelf_repo,
                &access,
            )),
            movie_service: Arc::new(catalog_service(
                MovieRepository::new(pg.clone()),
                &shelf_repo,
                &access,
            )),
            music_service: Arc::new(catalog_service(
                MusicRepository::new(pg.clone()),
                &shelf_repo,
                &access,
            )),
            show_service: Arc::new(catalog_service(ShowRepository::new(pg), &shelf_repo, &access)),
        })
    }
}

fn catalog_service<R: CatalogRepository>(
    items: R,
    shelves: &Arc<dyn ShelfStore>,
    access: &Arc<LocationAccess>,
) -> CatalogService<R> {
    CatalogService::new(Arc::new(items), Arc::clone(shelves), Arc::clone(access))
}

/// Lets generic catalog handlers find the service for their item kind.
pub trait CatalogState<R: CatalogRepository> {
    fn catalog(&self) -> &CatalogService<R>;
}

impl CatalogState<BookRepository> for AppState {
    fn catalog(&self) -> &CatalogService<BookRepository> {
        &self.book_service
    }
}

impl CatalogState<MovieRepository> for AppState {
    fn catalog(&self) -> &CatalogService<MovieRepository> {
        &self.movie_service
    }
}

impl CatalogState<MusicRepository> for AppState {
    fn catalog(&self) -> &CatalogService<MusicRepository> {
        &self.music_service
    }
}

impl CatalogState<ShowRepository> for AppState {
    fn catalog(&self) -> &CatalogService<ShowRepository> {
        &self.show_service
    }
}
