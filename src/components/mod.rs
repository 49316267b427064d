pub mod swatch_button;

pub use swatch_button::SwatchButton;
