//! Container formats.
//!
//! | Module  | Format | Description |
//! |---------|--------|-------------|
//! | [`xnb`] | XNB    | XNA Game Studio / MonoGame compiled content |

pub mod xnb;
