//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SULLE QUERY ************************* //

/*
   Le query usano le API runtime di sqlx (`sqlx::query_as::<_, T>` + `#[derive(FromRow)]`)
   e non le macro `query!`/`query_as!`: le macro vogliono un database raggiungibile (o la
   cache `.sqlx/`) in fase di compilazione, mentre così il crate compila ovunque e lo schema
   vero è quello in `migrations/`, applicato all'avvio e da `#[sqlx::test]`.

   Promemoria sui metodi di fetch:
   .execute(..)         -> INSERT/UPDATE/DELETE senza RETURNING
   .fetch_optional(..)  -> zero o una riga
   .fetch_one(..)       -> esattamente una riga, RowNotFound altrimenti
   .fetch_all(..)       -> Vec, anche vuoto
   Postgres usa i placeholder posizionali $1, $2, ...
*/

pub mod message;
pub mod sidekiq;
pub mod team;
pub mod thread;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Repository, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use message::MessageRepository;
pub use sidekiq::SidekiqRepository;
pub use team::TeamRepository;
pub use thread::ThreadRepository;
pub use user::UserRepository;
