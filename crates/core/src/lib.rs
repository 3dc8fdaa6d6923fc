pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod recommend;
pub mod search;

pub use accounts::{AccountDirectory, AuthSession};
pub use cart::Cart;
pub use catalog::{Catalog, Dataset, DatasetError};
pub use checkout::{
    compare_stores, CheckoutService, CheckoutSummary, MultiplierStoreComparator,
    OrderConfirmation, StoreComparator, StoreComparison,
};
pub use domain::account::{Address, AddressId, User, UserId};
pub use domain::cart::CartLineItem;
pub use domain::product::{Product, ProductId};
pub use domain::retailer::{RetailerId, RetailerProfile, RetailerQuote};
pub use errors::{AccountError, ApplicationError, DomainError, InterfaceError};
pub use recommend::{recommend, Recommendation, RecommendationEngine, RecommendationSource};
pub use search::{search_catalog, SearchHistory, SearchOptions, SearchSession, SortBy};
