/*!
This crate implements the client side of the cancellation risk prediction form. It turns a submitted form data set into a JSON payload, sends it through a [`Transport`], and renders the outcome through the [`SubmitControl`] and [`ResultDisplay`] traits. Nothing in this crate touches the DOM, so everything here runs and is tested natively. The `cancellation_ui` crate provides the browser implementations of the traits.
*/

mod config;
mod controller;
mod error;
mod fields;
mod payload;
mod response;
mod transport;

pub use self::config::*;
pub use self::controller::*;
pub use self::error::*;
pub use self::fields::*;
pub use self::payload::*;
pub use self::response::*;
pub use self::transport::*;
