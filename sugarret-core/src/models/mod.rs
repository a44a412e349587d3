mod cart_item;
mod catalog_entry;
mod delivery_zone;
mod meeting_type;
mod order_type;
mod rate_schedule;
mod return_details;
mod time_slot;

pub use cart_item::CartItem;
pub use catalog_entry::CatalogEntry;
pub use delivery_zone::DeliveryZone;
pub use meeting_type::MeetingType;
pub use order_type::OrderType;
pub use rate_schedule::ProfitRateSchedule;
pub use return_details::{ReturnDetails, ReturnProjection};
pub use time_slot::{SlotWindow, TimeSlot, TimeSlotParseError};
