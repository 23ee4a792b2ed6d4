pub mod date_formatter;

#[cfg(feature = "gpui")]
pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

#[cfg(feature = "gpui")]
impl PixelsExt for gpui::Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}
