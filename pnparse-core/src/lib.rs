//! `pnparse-core`.
//!
//! Turns a League of Legends patch notes page into wiki markup. The page is
//! parsed into a plain [`model::Document`] tree by one classifier per section
//! kind, then serialized with [`render::render`]. Any page structure the
//! classifiers do not recognise aborts the whole parse; there is no partial
//! output.
//!
//! # Example
//!
//! ```no_run
//! use pnparse_config::{Config, IconRegistry};
//! use pnparse_core::{HttpFetcher, Parser};
//! use pnparse_dragon::{Dragon, Endpoints};
//!
//! let config = Config::default();
//! let icons = IconRegistry::embedded().unwrap();
//! let dragon = Dragon::new(Endpoints::default());
//!
//! let rendered = Parser::new(&config, &icons, &dragon, &HttpFetcher)
//!   .parse("13.4")
//!   .unwrap();
//! println!("{}", rendered.markup);
//! ```

pub mod classify;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod html;
pub mod model;
pub mod parser;
pub mod render;
pub mod text;
mod utils;
pub mod version;

pub use error::{ParseError, StructuralError};
pub use fetch::{HttpFetcher, PageFetcher, StaticFetcher};
pub use parser::{Parser, Rendered};
pub use version::{PatchVersion, normalize};
