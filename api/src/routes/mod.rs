pub mod health_route;
pub mod products;
pub mod root_route;
pub mod ws;
