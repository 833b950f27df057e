//! Macros for monitoring error handling.
//!
//! Convenience macros for creating and returning [`crate::error::PilotError`]
//! instances with reduced boilerplate.

/// Creates a [`crate::error::PilotError`] from an error kind and description.
///
/// An optional third argument attaches dynamic detail, and `source:` attaches a
/// source error.
#[macro_export]
macro_rules! pilot_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::PilotError::new($kind, $desc)
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        $crate::error::PilotError::new($kind, $desc).with_source($source)
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::PilotError::new($kind, $desc).with_detail($detail.to_string())
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        $crate::error::PilotError::new($kind, $desc)
            .with_detail($detail.to_string())
            .with_source($source)
    };
}

/// Creates and returns a [`crate::error::PilotError`] from the current function.
///
/// Combines error creation with early return. Supports the same optional detail
/// and source arguments as [`pilot_error!`].
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return ::core::result::Result::Err($crate::pilot_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::pilot_error!($kind, $desc, source: $source))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return ::core::result::Result::Err($crate::pilot_error!($kind, $desc, $detail))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::pilot_error!(
            $kind,
            $desc,
            $detail,
            source: $source
        ))
    };
}
