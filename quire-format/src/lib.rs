//! Format object model for the quire math editor
//!
//!     This crate holds everything the editor knows about formatting: the
//!     format value objects attached to document elements, the aggregations
//!     that summarize a selection of formats, the XML attribute chains formats
//!     are stored with, and the exporters that turn a formatted document into
//!     CSS, HTML or LaTeX.
//!
//!     Like the rest of the toolchain this is a pure lib: no code here assumes
//!     a shell, prints to stdout or reads environment variables. Settings such
//!     as default fonts are injected by the caller (see the quire-config crate).
//!
//! Architecture
//!
//!     .
//!     ├── error.rs          # XmlError, FormatError, ExportError
//!     ├── scalar.rs         # Total-ordered f32 for set membership
//!     ├── color.rs          # RGBA colors and their CSS/XML spelling
//!     ├── element.rs        # Minimal element tree and Document
//!     ├── format            # Format trait, mixin traits and leaf formats
//!     │   ├── aggregation.rs
//!     │   ├── font          # FontFormat plus font interning
//!     │   └── <leaf>.rs     # paragraph, list, character, parenthesis...
//!     ├── registry.rs       # Format and aggregation creator registries
//!     ├── aggregations.rs   # AggregationsByCapability (copy on write)
//!     ├── xml               # Attribute chains and FormatOrganizer sheets
//!     └── export            # Exporter trait, registry and back-ends
//!
//! Capabilities
//!
//!     Each format reports an ordered list of capability names, ancestors
//!     first. An aggregation exists per capability; folding a format into
//!     [`AggregationsByCapability`] feeds it to the aggregation of every
//!     capability it has. Creators for both are looked up by name in
//!     [`registry`]; call [`registry::register_all`] once at start-up.
//!
//! Testing
//!
//!     Unit tests live next to the code. Cross-module behavior is covered in
//!     tests/, with insta inline snapshots for generated text and proptest for
//!     the aggregation laws.

pub mod aggregations;
pub mod color;
pub mod element;
pub mod error;
pub mod export;
pub mod format;
pub mod registry;
pub mod scalar;
pub mod xml;

pub use aggregations::AggregationsByCapability;
pub use element::{Document, Element, ElementKind, ElementPointer};
pub use error::{ExportError, FormatError, XmlError};
pub use export::{Exporter, ExporterRegistry};
pub use format::{Aggregation, Capabilities, Format, FormatPointer};
pub use registry::register_all;
pub use xml::FormatOrganizer;
