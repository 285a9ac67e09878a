//! # Site Builder Core
//!
//! Page model and element-tree store for a visual website builder.
//! Compiles to WASM so the browser editor drives the same store as the CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              builder-core.wasm              │
//! ├─────────────────────────────────────────────┤
//! │  BuilderStore    │  Commands                │
//! │  - Pages         │  - Serializable ops      │
//! │  - Selection     │  - Non-failing dispatch  │
//! │  - Undo history  │  - Palette drops         │
//! ├─────────────────────────────────────────────┤
//! │  ElementForest   │  Export                  │
//! │  - Arena by id   │  - website-export.json   │
//! │  - Parent links  │  - ISO-8601 stamps       │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod element;
pub mod error;
pub mod export;
pub mod history;
pub mod page;
pub mod palette;
pub mod schema;
pub mod state;
pub mod store;
pub mod tree;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use command::{Command, Outcome};
pub use element::{
    Attributes, Element, ElementId, ElementKind, ElementPatch, MoveTarget, StyleValue, Styles,
    ROOT_TARGET,
};
pub use error::{StoreError, StoreResult};
pub use export::{ExportDocument, ExportedPage, EXPORT_FILE_NAME};
pub use history::{History, Snapshot};
pub use page::{page_path, Page, PageId, Seo, SeoPatch};
pub use palette::{PaletteEntry, PaletteGroup};
pub use schema::{BuilderDocument, PageDocument};
pub use state::{Breakpoint, ViewSettings};
pub use store::{BuilderStore, ChangeKind, StoreConfig};
pub use tree::{ElementForest, ElementNode, Preorder};

/// Builder core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
