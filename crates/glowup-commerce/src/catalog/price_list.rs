//! Service price list.

use crate::cart::NewCartItem;
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// A bookable service with a fixed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub name: &'static str,
    /// Price in cents.
    pub price_cents: i64,
    pub image: &'static str,
}

impl Service {
    pub fn price(&self, currency: Currency) -> Money {
        Money::new(self.price_cents, currency)
    }

    /// Cart item for this service.
    pub fn to_cart_item(&self, currency: Currency) -> Result<NewCartItem, CommerceError> {
        NewCartItem::new(self.name, self.price(currency), self.image)
    }
}

/// A named group of services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceCategory {
    pub name: &'static str,
    pub services: &'static [Service],
}

/// Footnote shown under the price list.
pub const PRICE_NOTE: &str =
    "*Prices may vary based on specific requirements. Contact us for details.";

/// Every category, in display order.
pub static PRICE_LIST: &[ServiceCategory] = &[
    ServiceCategory {
        name: "Hair Services",
        services: &[
            Service {
                name: "Haircut & Styling",
                price_cents: 3000,
                image: "images/haircut.jpg",
            },
            Service {
                name: "Hair Coloring",
                price_cents: 5000,
                image: "images/hair-coloring.jpg",
            },
        ],
    },
    ServiceCategory {
        name: "Skin Treatments",
        services: &[
            Service {
                name: "Facial Treatment",
                price_cents: 4000,
                image: "images/facial.jpg",
            },
            Service {
                name: "Spa Treatment",
                price_cents: 6000,
                image: "images/spa.jpg",
            },
        ],
    },
    ServiceCategory {
        name: "Nail & Makeup",
        services: &[
            Service {
                name: "Manicure & Pedicure",
                price_cents: 2500,
                image: "images/manicure.jpg",
            },
            Service {
                name: "Professional Makeup",
                price_cents: 4500,
                image: "images/makeup.jpg",
            },
        ],
    },
];

/// Look up a service by name, ignoring case and surrounding whitespace.
pub fn find_service(name: &str) -> Option<&'static Service> {
    let name = name.trim();
    PRICE_LIST
        .iter()
        .flat_map(|c| c.services.iter())
        .find(|s| s.name.eq_ignore_ascii_case(name))
}
