pub mod route;
pub mod routes;
