//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella definita in `migrations/`.

pub mod enums;
pub mod message;
pub mod sidekiq;
pub mod team;
pub mod thread;
pub mod user;

// Re-exports per facilitare l'import
pub use enums::{MessageRole, TeamRole};
pub use message::Message;
pub use sidekiq::Sidekiq;
pub use team::{Team, TeamMember};
pub use thread::Thread;
pub use user::User;
