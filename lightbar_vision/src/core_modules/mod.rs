pub mod brightness_validator;
pub mod extractor;
pub mod frame;
pub mod geometry;
pub mod light_bar;
pub mod pair_matcher;
pub mod photometric;
pub mod pixel;
pub mod shape_classifier;
