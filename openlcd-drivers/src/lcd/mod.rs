//! Character LCD drivers
//!
//! - [`SerLcd`]: blocking, for `embedded-hal` delays
//! - [`SerLcdAsync`]: async, for `embedded-hal-async` delays (embassy)
//!
//! Both replay [`openlcd_protocol::Operation`] sequences onto a bus, so
//! they put identical bytes, framing and pauses on the wire.

pub mod serlcd;
pub mod serlcd_async;

pub use serlcd::SerLcd;
pub use serlcd_async::SerLcdAsync;
