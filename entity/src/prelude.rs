pub use super::analytics_event::Entity as AnalyticsEvent;
pub use super::analytics_session::Entity as AnalyticsSession;
pub use super::audit_log::Entity as AuditLog;
pub use super::cart::Entity as Cart;
pub use super::cart_item::Entity as CartItem;
pub use super::faq::Entity as Faq;
pub use super::game::Entity as Game;
pub use super::game_version::Entity as GameVersion;
pub use super::library_entry::Entity as LibraryEntry;
pub use super::news_article::Entity as NewsArticle;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::payment::Entity as Payment;
pub use super::review::Entity as Review;
pub use super::support_ticket::Entity as SupportTicket;
pub use super::ticket_message::Entity as TicketMessage;
pub use super::upload_chunk::Entity as UploadChunk;
pub use super::upload_session::Entity as UploadSession;
pub use super::user::Entity as User;
pub use super::user_follow::Entity as UserFollow;
