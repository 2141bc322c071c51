//! Style engine tests
//!
//! Styles are applied to elements found by trace in a parsed source, the edit
//! is applied, and the result is parsed again to remove the style.

mod direct;
mod inner;
mod outer;
mod roundtrip;
