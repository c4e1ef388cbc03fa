mod client_utils;
mod errors;
mod fallback;
mod gift_store;
mod local;
mod supabase;
mod types;

pub use errors::*;
pub use fallback::FallbackStore;
pub use gift_store::GiftStore;
pub use local::LocalStore;
pub use supabase::{SupabaseStore, SupabaseStoreOptions};
pub use types::*;
