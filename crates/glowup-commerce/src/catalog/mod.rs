//! Service catalog module.
//!
//! The parlour's fixed price list, grouped by category.

mod price_list;

pub use price_list::{find_service, Service, ServiceCategory, PRICE_LIST, PRICE_NOTE};
