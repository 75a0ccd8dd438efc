//
//  mod.rs
//  Drift
//
//  Created by hak (tharun)
//

pub mod classes;
pub mod endpoints;
pub mod normalize;

pub use classes::{diff_class, diff_classes, merge_class_maps, ClassDiff};
pub use endpoints::{heuristic_fragment, missing_endpoints, EndpointMatcher, MatchStrategy};
pub use normalize::{normalize_path, strip_placeholders, trim_trailing_slashes};
