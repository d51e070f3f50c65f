// Profile persistence: the store seam, its Supabase implementation, the per-user
// upsert discipline, and the CRUD endpoints built on them.

pub mod handlers;
pub mod store;
pub mod supabase;
pub mod upsert;
