pub mod controller;
pub mod crud;
pub mod interface;
pub mod model;
pub mod routes;
pub mod schema;

pub use crud::SiteCrud;
pub use interface::SiteRepository;
pub use routes::website_routes;
