pub mod reload_products_response;
pub mod reload_products_route;
pub mod search_products_request;
pub mod search_products_route;
