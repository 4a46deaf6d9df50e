//! `pnparse-dragon`.
//!
//! Reference catalogs used to tell champions from items, runes and summoner
//! spells while parsing patch notes. Catalogs are versioned upstream; a
//! [`Dragon`] only refetches when the version token changes and swaps the
//! whole [`ReferenceSnapshot`] at once.
//!
//! # Example
//!
//! ```no_run
//! use pnparse_dragon::{Dragon, Endpoints, SubjectKind};
//!
//! let dragon = Dragon::new(Endpoints::default());
//! dragon.refresh().unwrap();
//! assert_eq!(dragon.snapshot().kind_of("Ahri"), SubjectKind::Character);
//! ```

mod dragon;
pub mod error;
mod snapshot;
pub mod source;

pub use dragon::{Dragon, Endpoints};
pub use error::DragonError;
pub use snapshot::{CatalogEntry, ReferenceSnapshot, SubjectKind};
pub use source::{CatalogSource, HttpSource, StaticSource};
