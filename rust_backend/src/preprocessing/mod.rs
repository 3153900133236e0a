pub mod validator;

pub use validator::{TicketValidator, ValidationResult, ValidationStats};
