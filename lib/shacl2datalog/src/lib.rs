#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod constraint;
mod error;
mod model;
pub mod name;
mod program;
pub mod term;
mod translate;
pub mod vocab;

pub use constraint::Constraint;
pub use error::{ShaclError, ShapeParseError, TranslateError, UnsupportedTermError};
pub use model::{Severity, Shape, ShapeId, ShapeProvider, ShapesGraph, Target};
pub use name::Namespace;
pub use program::{Atom, DEFAULT_INCLUDE, Predicate, Program, Rule};
pub use translate::{ShapeTranslator, TranslateOptions, translate, translate_graph};
