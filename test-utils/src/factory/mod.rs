//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation. Factories that need parent
//! rows take their ids explicitly; `helpers` builds whole dependency chains.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let developer = factory::user::create_user(db).await?;
//! let game = factory::game::GameFactory::new(db, developer.id)
//!     .title("Forge Runner")
//!     .published(true)
//!     .build()
//!     .await?;
//!
//! let (buyer, game, entry) = factory::helpers::create_owned_game(db).await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users keyed by Keycloak subject
//! - `game` / `game_version` - Catalog entries and their releases
//! - `order` - Orders with items
//! - `library_entry` - Owned games
//! - `support_ticket` - Support tickets
//! - `faq` / `news_article` - Editorial content
//! - `upload_session` - Chunked upload sessions
//! - `helpers` - Unique id counter and dependency chains

pub mod faq;
pub mod game;
pub mod game_version;
pub mod helpers;
pub mod library_entry;
pub mod news_article;
pub mod order;
pub mod support_ticket;
pub mod upload_session;
pub mod user;

pub use faq::create_faq;
pub use game::create_game;
pub use game_version::create_game_version;
pub use library_entry::create_library_entry;
pub use news_article::create_news_article;
pub use support_ticket::create_ticket;
pub use user::create_user;
