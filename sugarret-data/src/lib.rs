mod loader;

pub use loader::{
    CatalogLoader, CatalogRecord, DataLoaderError, DeliveryZoneLoader, DeliveryZoneRecord,
    RateScheduleLoader, RateScheduleRecord,
};
