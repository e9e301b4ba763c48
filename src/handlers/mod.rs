// Route handlers: thin glue between HTTP and the services.
//
// Public:        /api/v1/interactions/:customer_id, /api/v1/stats/:table_name, /health
// Authenticated: /api/v1/user-access
// Admin only:    /api/v1/interactions/products, /api/v1/admin-access
pub mod access;
pub mod health;
pub mod interactions;
pub mod stats;

pub use access::{admin_access, user_access};
pub use health::health;
pub use interactions::{customer_interactions, interactions_per_product};
pub use stats::table_count;
