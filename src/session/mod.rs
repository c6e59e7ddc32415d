pub mod progression;
pub mod question;
pub mod state;
