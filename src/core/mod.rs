pub mod error;
pub mod extract;
pub mod filter;
pub mod io;
pub mod location;
pub mod metrics;
pub mod model;
pub mod plot;
pub mod summary;
