mod procedures;
pub mod response;
mod router;
pub mod rpc;

pub use procedures::rpc_router;
pub use router::{AppState, create_router};
