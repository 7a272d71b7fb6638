pub mod in_flight;
pub mod path;
pub mod scope;
pub mod token;
pub mod validation;

pub use in_flight::{InFlight, InFlightGuard};
pub use scope::{ScopeTicket, ViewScope};
