pub mod controller;
pub mod crud;
pub mod interface;
pub mod model;
pub mod routes;
pub mod schema;

pub use crud::MonitoringCrud;
pub use interface::ResultSink;
pub use model::MonitoringResult;
pub use routes::monitor_routes;
