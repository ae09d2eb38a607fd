pub mod attendees;
pub mod form;

pub use form::{EventForm, EventInput, FormField, Submission, ValidationError, FORM_DATETIME_FORMAT};
