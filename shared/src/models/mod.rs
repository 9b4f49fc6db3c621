//! Data models mirrored from the ordering backend
//!
//! Records are held in local view state until a later response or push
//! message supersedes them; the client enforces only form validation.

pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod store_info;

pub use dining_table::{CreatedTable, DiningTable, ProvisioningInfo, TableCreate};
pub use menu_item::{AvailabilityUpdate, MenuItem, MenuItemPayload};
pub use order::{
    Order, OrderItemRequest, OrderLine, OrderStatus, PlaceOrderRequest, StatusUpdate,
};
pub use store_info::{RestaurantDetails, RestaurantUpdate};
