//! Application State - Stato condiviso dell'applicazione
//!
//! Contiene i repository e la configurazione necessaria alle procedure.
//! È immutabile dopo l'avvio: l'unico stato mutabile condiviso è il database.

use crate::repositories::{
    MessageRepository, SidekiqRepository, TeamRepository, ThreadRepository, UserRepository,
};
use sqlx::PgPool;

pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per team e membership
    pub team: TeamRepository,

    /// Repository per gli assistenti
    pub sidekiq: SidekiqRepository,

    /// Repository per i thread
    pub thread: ThreadRepository,

    /// Repository per i messaggi dei thread
    pub msg: MessageRepository,

    /// Pool condiviso, usato direttamente solo da `resetAndSeed`
    pub pool: PgPool,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Espone `POST /api/test/reset-and-seed`
    pub expose_test_hooks: bool,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e la JWT secret.
    pub fn new(pool: PgPool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            team: TeamRepository::new(pool.clone()),
            sidekiq: SidekiqRepository::new(pool.clone()),
            thread: ThreadRepository::new(pool.clone()),
            msg: MessageRepository::new(pool.clone()),
            pool,
            jwt_secret,
            expose_test_hooks: false,
        }
    }

    pub fn with_test_hooks(mut self, enabled: bool) -> Self {
        self.expose_test_hooks = enabled;
        self
    }
}
