//! Data models for promotion agreements and discount schemas.

pub mod config;
pub mod document;
pub mod schema;

pub use config::{AreaInfo, DschemaConfig, Profile, SchemaConfig, Sequencing, ValidationPolicy};
pub use document::{
    Area, Document, DraftDocument, DraftSkuEntry, Flag, Outlet, SelectionMode, SkuEntry,
    StrataTier,
};
pub use schema::{BreakKind, BreakLine, Customer, DiscountBreak, DiscountSchema, OrgAssignment};
