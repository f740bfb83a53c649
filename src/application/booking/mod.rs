mod booking_service;
mod errors;
mod item_schedule;

#[allow(unused_imports)]
pub use booking_service::{
    ServiceDependencies, create_booking, decide_booking, get_all_booking_by_user,
    get_all_booking_item_by_user, get_booking_by_user,
};
#[allow(unused_imports)]
pub use errors::{BookingApplicationError, NotFoundReason, Result};
#[allow(unused_imports)]
pub use item_schedule::{has_completed_booking, item_booking_schedule};
