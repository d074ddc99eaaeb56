/// Errors that can occur when configuring or feeding the box merger.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BoxMergeError {
    /// A merge or filter parameter is negative or not finite.
    #[error("Invalid value for {name}: {value}")]
    InvalidConfig {
        /// name of the offending parameter.
        name: &'static str,
        /// the rejected value.
        value: f64,
    },

    /// The rectangle has a zero width or height.
    #[error("Rectangle must have a positive extent, got {width}x{height}")]
    EmptyRect {
        /// width of the rejected rectangle.
        width: u32,
        /// height of the rejected rectangle.
        height: u32,
    },
}
