pub mod date_range;
pub mod event;
pub mod iso;
pub mod user;

pub use date_range::{DateWindow, ViewType};
pub use event::{Attendee, Event, NewEvent, Organizer, SaveAck, ATTENDEE_ROLE};
pub use user::User;
