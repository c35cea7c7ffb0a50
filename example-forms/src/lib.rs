pub mod contact;
pub mod event_registration;

// Re-export contact forms
pub use contact::{CONTACT_FORM_ID, contact_form};

// Re-export event registration forms
pub use event_registration::{EVENT_FORM_ID, event_registration, event_registration_submission};
