//! # IMSC Reader: IMSC / TTML Subtitles to a Typed Document Model
//!
//! This crate converts a namespace-aware XML element tree that follows the TTML / IMSC
//! subtitle vocabulary into the document model defined by `imsc_model`: a region map
//! plus a single `body` tree of `div`, `p` and `span` elements carrying typed styles
//! and their resolved `xml:space` / `xml:lang`.
//!
//! The entry points are:
//! - [`read_imsc`]: parses a TTML string with `quick-xml` and converts it.
//! - [`convert`]: converts an already built [`XmlElement`] tree.
//!
//! ## Failure policy
//!
//! Most structural problems (a second `body`, a region without `xml:id`, a reference to an
//! unknown region, ...) are recorded as [`Diagnostic`](imsc_model::Diagnostic)s and the
//! offending piece is skipped. Three conditions abort the conversion instead: a root
//! element that is not `tt`, a recognized style attribute whose value does not match its
//! grammar, and nesting deeper than the configured limit.
//!
//! ## Example
//!
//! ```rust
//! use imsc_reader::read_imsc;
//! use imsc_model::{Length, LengthUnit, ReaderOptions, Stylable, StyleProperty, StyleValue};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ttml = r#"
//!     <tt xmlns="http://www.w3.org/ns/ttml"
//!         xmlns:tts="http://www.w3.org/ns/ttml#styling"
//!         xml:lang="en">
//!       <head>
//!         <layout>
//!           <region xml:id="bottom"/>
//!         </layout>
//!       </head>
//!       <body>
//!         <div>
//!           <p region="bottom" tts:lineHeight="1.2em">Hello</p>
//!         </div>
//!       </body>
//!     </tt>"#;
//!
//!     let parsed = read_imsc(ttml, &ReaderOptions::default())?;
//!     assert!(parsed.diagnostics.is_empty());
//!
//!     let body = parsed.document.body().expect("body");
//!     let p = &body.children()[0].children()[0];
//!     assert_eq!(p.region(), Some("bottom"));
//!     assert_eq!(p.lang(), "en");
//!     assert_eq!(
//!         p.get_style(StyleProperty::LineHeight),
//!         Some(&StyleValue::Length(Length::new(1.2, LengthUnit::Em)))
//!     );
//!
//!     // A malformed value for a recognized style property aborts the whole conversion.
//!     let broken = ttml.replace("1.2em", "abc");
//!     assert!(read_imsc(&broken, &ReaderOptions::default()).is_err());
//!
//!     Ok(())
//! }
//! ```

pub mod reader;
pub mod tree;

pub use reader::{convert, convert_with_diagnostics, read_imsc};
pub use tree::{QualifiedName, XmlAttribute, XmlElement, parse_element_tree};
