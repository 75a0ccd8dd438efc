//
//  mod.rs
//  Drift
//
//  Created by hak (tharun)
//

pub mod extractor;
pub mod source;
pub mod template;

pub use extractor::{
    extract_classes, extract_endpoints, extract_file, extract_request_calls, extract_symbols,
    CallShape, FileSymbols,
};
pub use source::{load_source, SourceFile, SourceLoad};
pub use template::{resolve, Segment, StringTemplate};
