//! Signup form state module

mod coach;
mod error;
mod focus;
mod lifts;
mod signup_state;
mod upload;

pub use coach::*;
pub use error::FormError;
pub use focus::FormFocus;
pub use lifts::*;
pub use signup_state::*;
pub use upload::UploadedFile;
