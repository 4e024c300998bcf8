//! hdrslim Resolver
//!
//! Discovers the quoted-include closure of a set of entry headers and copies
//! it into a renamed header tree.
//!
//! ## Modules
//!
//! - `scan` - Per-line include directive extraction with comment stripping
//! - `resolver` - Depth-first include closure over ordered include roots
//! - `mapping` - Source to destination path renaming
//! - `materialize` - Copying the closure into the renamed tree
//! - `pipeline` - Resolve and materialize from a `Config`
//! - `survey` - Header counts of the full tree, for comparison

pub mod mapping;
pub mod materialize;
pub mod paths;
pub mod pipeline;
pub mod resolver;
pub mod scan;
pub mod survey;

pub use mapping::PathMapping;
pub use materialize::TreeMaterializer;
pub use pipeline::Pipeline;
pub use resolver::IncludeResolver;
pub use scan::{split_lines, strip_comments, IncludeDirective, IncludeScanner};
pub use survey::{survey_roots, TreeSurvey, HEADER_EXTENSIONS};
