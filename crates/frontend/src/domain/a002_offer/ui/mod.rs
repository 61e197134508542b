mod banner;
mod carousel;
mod form;
mod notify;

pub use carousel::OfferCarousel;
