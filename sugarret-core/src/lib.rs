pub mod calculations;
pub mod cart;
pub mod catalog;
pub mod delivery;
pub mod meeting;
pub mod models;
pub mod scheduling;

pub use calculations::{ReturnCalculator, ReturnsError, compute_returns, compute_roi};
pub use cart::{Cart, CartError, OrderConfirmation};
pub use catalog::{Catalog, CatalogError};
pub use delivery::{DeliveryChecker, DeliveryError, DeliveryQuote, RandomSource};
pub use meeting::{ConfirmedMeeting, MeetingError, MeetingRequest};
pub use models::*;
pub use scheduling::{ScheduleError, SlotScheduler, available_dates, parse_date, time_slots};
