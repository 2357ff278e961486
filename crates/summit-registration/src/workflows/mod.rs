pub mod camp;
pub mod hubspot;
pub mod intake;
pub mod registration;
pub mod summit;
